use crate::{
    gate::{Rejection, RequestValidator},
    request::IncomingRequest,
};

/// Handler that only runs once its request has been validated
#[derive(Debug, Clone)]
pub struct Protected<H> {
    validator: RequestValidator,
    handler: H,
}

impl RequestValidator {
    /// Wrap a handler so it is only invoked for requests that pass `validate`.
    /// Rejected requests are returned as `Err` without calling the handler.
    pub fn protect<H, T>(&self, handler: H) -> Protected<H>
    where
        H: Fn(&IncomingRequest) -> T,
    {
        Protected {
            validator: self.clone(),
            handler,
        }
    }
}

impl<H> Protected<H> {
    pub fn call<T>(&self, request: &IncomingRequest) -> Result<T, Rejection>
    where
        H: Fn(&IncomingRequest) -> T,
    {
        self.validator.validate(request).into_result()?;
        Ok((self.handler)(request))
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::SigningKey;
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
    };

    const GOLDEN: &str = "bVC8YmH56Aj38JxyqIXPLvKpZQo=";

    fn validator() -> RequestValidator {
        RequestValidator::new(SigningKey::new("secret").unwrap())
    }

    fn request() -> IncomingRequest {
        IncomingRequest::new("POST", "https://example.com/hook")
            .unwrap()
            .with_form_field("Name", "value")
    }

    #[test]
    fn runs_handler_on_accept() {
        let protected = validator().protect(|request: &IncomingRequest| {
            format!("<Response><Say>Hello {}</Say></Response>", request.form_field("Name").unwrap())
        });

        let response = protected.call(&request().with_signature(GOLDEN));
        assert_eq!(
            response,
            Ok("<Response><Say>Hello value</Say></Response>".to_string())
        );
    }

    #[test]
    fn skips_handler_on_reject() {
        let calls = AtomicUsize::new(0);
        let protected = validator().protect(|_: &IncomingRequest| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(protected.call(&request()), Err(Rejection::NoSignatureHeader));
        assert_eq!(
            protected.call(&request().with_signature("forged")),
            Err(Rejection::Mismatch)
        );
        let no_body = IncomingRequest::new("POST", "https://example.com/hook")
            .unwrap()
            .with_signature(GOLDEN);
        assert_eq!(protected.call(&no_body), Err(Rejection::NoBody));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(protected.call(&request().with_signature(GOLDEN)), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shared_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let handler_calls = Arc::clone(&calls);
        let protected = Arc::new(validator().protect(move |_: &IncomingRequest| {
            handler_calls.fetch_add(1, Ordering::SeqCst);
        }));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let protected = Arc::clone(&protected);
                thread::spawn(move || {
                    let signature = if i % 2 == 0 { GOLDEN } else { "forged" };
                    protected.call(&request().with_signature(signature)).is_ok()
                })
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|accepted| *accepted)
            .count();
        assert_eq!(accepted, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
