use crate::{
    gate::{Rejection, RequestValidator},
    request::IncomingRequest,
};
use futures_util::future::{self, Either, FutureExt};
use std::future::Future;

/// Asynchronous handler that only runs once its request has been validated
#[derive(Debug, Clone)]
pub struct ProtectedAsync<H> {
    validator: RequestValidator,
    handler: H,
}

impl RequestValidator {
    /// Wrap a handler returning a future. Validation runs before the handler is called,
    /// a rejected request resolves immediately to `Err` and the handler never runs.
    pub fn protect_async<H, Fut>(&self, handler: H) -> ProtectedAsync<H>
    where
        H: Fn(IncomingRequest) -> Fut,
        Fut: Future,
    {
        ProtectedAsync {
            validator: self.clone(),
            handler,
        }
    }
}

impl<H> ProtectedAsync<H> {
    /// Returns a `std::future::Future` that can be `.await`'d
    pub fn call<Fut>(
        &self,
        request: IncomingRequest,
    ) -> impl Future<Output = Result<Fut::Output, Rejection>>
    where
        H: Fn(IncomingRequest) -> Fut,
        Fut: Future,
    {
        match self.validator.validate(&request).into_result() {
            Ok(()) => Either::Left((self.handler)(request).map(Ok::<_, Rejection>)),
            Err(rejection) => Either::Right(future::err(rejection)),
        }
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }
}
