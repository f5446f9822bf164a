use failure::{Error, Fail};
use log::error;

/// Error raised while loading the signing key. Fatal at startup.
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ConfigError {
    #[fail(display = "Signing key is empty")]
    EmptyKey,
    #[fail(display = "Environment variable '{}' is not set", name)]
    MissingEnv { name: String },
    #[fail(display = "Environment variable '{}' is not valid unicode", name)]
    NotUnicodeEnv { name: String },
}

/// Error raised while building an `IncomingRequest`
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum RequestError {
    #[fail(display = "Could not parse request url: '{}'", url)]
    UrlParse { url: String },
    #[fail(display = "Expecting 'http' or 'https', got '{}'", scheme)]
    UrlScheme { scheme: String },
}

pub fn log_error<T>(e: Error) -> Result<T, Error> {
    error!("{}", e);
    for cause in e.iter_causes() {
        error!("Caused by: {}", cause);
    }
    Err(e)
}
