pub const SIGNATURE_HEADER: &str = "X-Twilio-Signature";
pub const AUTH_TOKEN_ENV_VAR: &str = "TWILIO_AUTH_TOKEN";
pub const SECURE_SCHEME: &str = "https";
pub const PLAIN_SCHEME: &str = "http";
pub const REQUIRED_METHOD: &str = "POST";
pub const STATUS_NO_SIGNATURE_HEADER: u16 = 418;
pub const STATUS_NO_BODY: u16 = 400;
pub const STATUS_MISMATCH: u16 = 403;
