use crate::{
    canonical::{canonicalize, SchemePolicy},
    compare::signatures_match,
    constants::*,
    error::log_error,
    request::IncomingRequest,
    signer::{sign, SigningKey},
};
use failure::{Error, Fail};
use log::{debug, warn};
use std::fmt;

/// Why a request was turned away. Display output is the terse body sent back to the
/// caller and never contains secret material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum Rejection {
    NoSignatureHeader,
    NoBody,
    Mismatch,
}

impl Rejection {
    /// Missing header maps to 418, the request most likely did not come from Twilio
    pub fn status_code(self) -> u16 {
        match self {
            Rejection::NoSignatureHeader => STATUS_NO_SIGNATURE_HEADER,
            Rejection::NoBody => STATUS_NO_BODY,
            Rejection::Mismatch => STATUS_MISMATCH,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Rejection::NoSignatureHeader => "No signature header",
            Rejection::NoBody => "Bad Request - no form params",
            Rejection::Mismatch => "Signature does not match",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(self) -> bool {
        self == ValidationOutcome::Accepted
    }

    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            ValidationOutcome::Accepted => Ok(()),
            ValidationOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Decides whether a request was signed by Twilio.
///
/// Holds no mutable state, a single instance can be shared by every request handling
/// thread or task.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    key: SigningKey,
    scheme_policy: SchemePolicy,
}

impl RequestValidator {
    /// Validator with the default `SchemePolicy::ForceSecure`
    pub fn new(key: SigningKey) -> Self {
        RequestValidator {
            key,
            scheme_policy: SchemePolicy::default(),
        }
    }

    /// Load the key from `TWILIO_AUTH_TOKEN`. Failing here should stop the process
    /// from serving requests.
    pub fn from_env() -> Result<Self, Error> {
        let key = SigningKey::from_env().or_else(log_error)?;
        Ok(RequestValidator::new(key))
    }

    pub fn with_scheme_policy(mut self, scheme_policy: SchemePolicy) -> Self {
        self.scheme_policy = scheme_policy;
        self
    }

    pub fn scheme_policy(&self) -> SchemePolicy {
        self.scheme_policy
    }

    /// Validate a single request.
    ///
    /// - No `X-Twilio-Signature` header: `NoSignatureHeader`
    ///
    /// - Not a POST, or no form params: `NoBody`
    ///
    /// - Otherwise the signature computed over the canonical string is compared to the
    /// claimed one: `Accepted` or `Mismatch`
    pub fn validate(&self, request: &IncomingRequest) -> ValidationOutcome {
        let outcome = evaluate(request, &self.key, self.scheme_policy);

        match outcome {
            ValidationOutcome::Accepted => debug!("Request to '{}' validated", request.path()),
            ValidationOutcome::Rejected(rejection) => warn!(
                "Rejected request to '{}': {}",
                request.path(),
                rejection
            ),
        }

        outcome
    }
}

/// Validate a request against `key` using `SchemePolicy::ForceSecure`
pub fn validate(request: &IncomingRequest, key: &SigningKey) -> ValidationOutcome {
    evaluate(request, key, SchemePolicy::default())
}

fn evaluate(
    request: &IncomingRequest,
    key: &SigningKey,
    scheme_policy: SchemePolicy,
) -> ValidationOutcome {
    let claimed = match request.signature() {
        Some(signature) => signature,
        None => return ValidationOutcome::Rejected(Rejection::NoSignatureHeader),
    };

    // Form params are only signed for POST, anything else has nothing to check
    if !request.is_post() || !request.has_form_fields() {
        return ValidationOutcome::Rejected(Rejection::NoBody);
    }

    let canonical = canonicalize(request, scheme_policy);
    let computed = sign(&canonical, key);

    if signatures_match(computed.as_str(), claimed) {
        ValidationOutcome::Accepted
    } else {
        ValidationOutcome::Rejected(Rejection::Mismatch)
    }
}
