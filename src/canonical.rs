use crate::{constants::SECURE_SCHEME, request::IncomingRequest};
use std::fmt;

/// Which scheme the signed url carries.
///
/// Twilio signs the url it was configured with. When TLS is terminated by a proxy or
/// tunnel in front of this service the received url says `http` while Twilio signed
/// `https`, so by default the scheme is rebuilt as `https`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemePolicy {
    /// Always sign with `https`
    ForceSecure,
    /// Sign with the scheme the request was received on
    AsReceived,
}

impl Default for SchemePolicy {
    fn default() -> Self {
        SchemePolicy::ForceSecure
    }
}

/// The exact string both parties sign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalString(String);

impl CanonicalString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the signing string: the url with its scheme set per `policy`, followed by
/// every form field name and value sorted by name, with no delimiters.
///
/// Values are used exactly as received, nothing is trimmed or normalized.
pub fn canonicalize(request: &IncomingRequest, policy: SchemePolicy) -> CanonicalString {
    let scheme = match policy {
        SchemePolicy::ForceSecure => SECURE_SCHEME.to_string(),
        SchemePolicy::AsReceived => request.scheme(),
    };
    let rest = request.url_after_scheme();

    let fields_len: usize = request
        .form_fields()
        .map(|(name, value)| name.len() + value.len())
        .sum();
    let mut canonical = String::with_capacity(scheme.len() + rest.len() + fields_len);

    canonical.push_str(&scheme);
    canonical.push_str(rest);
    for (name, value) in request.form_fields() {
        canonical.push_str(name);
        canonical.push_str(value);
    }

    CanonicalString(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> IncomingRequest {
        IncomingRequest::new("POST", url).unwrap()
    }

    #[test]
    fn single_field() {
        let request = request("https://example.com/hook").with_form_field("Name", "value");
        assert_eq!(
            canonicalize(&request, SchemePolicy::ForceSecure).as_str(),
            "https://example.com/hookNamevalue"
        );
    }

    #[test]
    fn forces_secure_scheme() {
        let request = request("http://example.com/hook").with_form_field("Name", "value");
        assert_eq!(
            canonicalize(&request, SchemePolicy::ForceSecure).as_str(),
            "https://example.com/hookNamevalue"
        );
        assert_eq!(
            canonicalize(&request, SchemePolicy::AsReceived).as_str(),
            "http://example.com/hookNamevalue"
        );
    }

    #[test]
    fn only_scheme_is_rewritten() {
        let request = request("http://example.com/http/hook?next=http://other").with_form_field("A", "b");
        assert_eq!(
            canonicalize(&request, SchemePolicy::ForceSecure).as_str(),
            "https://example.com/http/hook?next=http://otherAb"
        );
    }

    #[test]
    fn sorts_case_sensitively() {
        let request = request("https://example.com/hook")
            .with_form_field("b", "3")
            .with_form_field("B", "2")
            .with_form_field("a", "1")
            .with_form_field("A", "0");
        assert_eq!(
            canonicalize(&request, SchemePolicy::ForceSecure).as_str(),
            "https://example.com/hookA0B2a1b3"
        );
    }

    #[test]
    fn keeps_values_verbatim() {
        let request = request("https://example.com/hook")
            .with_form_field("Body", " Héllo\twörld ")
            .with_form_field("Empty", "");
        assert_eq!(
            canonicalize(&request, SchemePolicy::ForceSecure).as_str(),
            "https://example.com/hookBody Héllo\twörld Empty"
        );
    }
}
