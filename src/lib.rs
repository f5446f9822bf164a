//! Verify that incoming webhook requests were sent by Twilio.
//!
//! - Built using the [Webhook Security](https://www.twilio.com/docs/usage/security#validating-requests)
//! documentation as reference.
//!
//! - Requests are authenticated with the account auth token only, nothing is fetched
//! and nothing is cached between requests.
//!
//! # Features
//! Both sync and async handler wrappers are provided by default. These are behind
//! feature flags `sync` or `async`, respectively.
//!
//! - `sync` provides `RequestValidator::protect` returning `Protected`
//! - `async` provides `RequestValidator::protect_async` returning `ProtectedAsync`
//!
//! # Using
//! The signature is computed over the url Twilio was configured with, followed by the
//! POST params sorted by name. When TLS is terminated in front of the service
//! (ngrok, a load balancer) the url is received as `http`, the default
//! `SchemePolicy::ForceSecure` signs it as `https` regardless.
//!
//! ```rust
//! use twilio_verifier::{IncomingRequest, RequestValidator, SigningKey};
//!
//! // Usually `RequestValidator::from_env()`, reading `TWILIO_AUTH_TOKEN`
//! let validator = RequestValidator::new(SigningKey::new("secret").unwrap());
//!
//! let voice = validator.protect(|_request: &IncomingRequest| {
//!     "<Response><Say>Signature is validated!</Say></Response>"
//! });
//!
//! let request = IncomingRequest::new("POST", "http://example.com/hook")
//!     .unwrap()
//!     .with_headers(vec![("X-Twilio-Signature", "bVC8YmH56Aj38JxyqIXPLvKpZQo=")])
//!     .with_form_body(b"Name=value");
//!
//! match voice.call(&request) {
//!     Ok(twiml) => assert!(twiml.contains("validated")),
//!     Err(rejection) => panic!("{} {}", rejection.status_code(), rejection),
//! }
//! ```
//!

mod canonical;
mod compare;
mod constants;
mod error;
mod gate;
mod request;
mod signer;

pub use canonical::{canonicalize, CanonicalString, SchemePolicy};
pub use compare::signatures_match;
pub use constants::{AUTH_TOKEN_ENV_VAR, SIGNATURE_HEADER};
pub use error::{ConfigError, RequestError};
pub use gate::{validate, Rejection, RequestValidator, ValidationOutcome};
pub use request::IncomingRequest;
pub use signer::{sign, EncodedSignature, SigningKey};

#[cfg(feature = "sync")]
mod sync;
#[cfg(feature = "sync")]
pub use sync::Protected;

#[cfg(feature = "async")]
mod r#async;
#[cfg(feature = "async")]
pub use r#async::ProtectedAsync;
