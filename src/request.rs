use crate::{constants::*, error::RequestError};
use std::collections::BTreeMap;
use url::{form_urlencoded, Url};

/// Immutable view of one inbound webhook request.
///
/// Form fields are kept ordered by name (byte-wise, case-sensitive), which is
/// the order the signature is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    method: String,
    url: String,
    scheme_len: usize,
    path: String,
    form: BTreeMap<String, String>,
    signature: Option<String>,
}

impl IncomingRequest {
    /// Create a request from its method and full url (scheme through query string).
    ///
    /// The url text is kept exactly as given, it is only parsed to make sure it is an
    /// absolute `http` or `https` url.
    pub fn new(method: &str, url: &str) -> Result<Self, RequestError> {
        let parsed = Url::parse(url).map_err(|_| RequestError::UrlParse {
            url: url.to_owned(),
        })?;

        let scheme = parsed.scheme();
        if scheme != SECURE_SCHEME && scheme != PLAIN_SCHEME {
            return Err(RequestError::UrlScheme {
                scheme: scheme.to_owned(),
            });
        }

        // The parser trims surrounding whitespace and tolerates missing slashes, the
        // verbatim text must still begin with `<scheme>://`
        let scheme_len = scheme.len();
        let verbatim = url.is_char_boundary(scheme_len)
            && url[..scheme_len].eq_ignore_ascii_case(scheme)
            && url[scheme_len..].starts_with("://");
        if !verbatim {
            return Err(RequestError::UrlParse {
                url: url.to_owned(),
            });
        }

        Ok(IncomingRequest {
            method: method.to_owned(),
            url: url.to_owned(),
            scheme_len,
            path: parsed.path().to_owned(),
            form: BTreeMap::new(),
            signature: None,
        })
    }

    /// Add a single form field. If the name is already present the first value is kept.
    pub fn with_form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Add every field of an `application/x-www-form-urlencoded` body
    pub fn with_form_body(self, body: &[u8]) -> Self {
        form_urlencoded::parse(body).fold(self, |request, (name, value)| {
            request.with_form_field(name.into_owned(), value.into_owned())
        })
    }

    /// Set the claimed signature, the value of the `X-Twilio-Signature` header
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Pick the claimed signature out of the request headers. Header names are
    /// matched case-insensitively, the first match wins.
    pub fn with_headers<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        if let Some((_, value)) = headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(SIGNATURE_HEADER))
        {
            self.signature = Some(value.to_owned());
        }
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case(REQUIRED_METHOD)
    }

    /// Full url as received
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lowercased scheme of the received url
    pub fn scheme(&self) -> String {
        self.url[..self.scheme_len].to_ascii_lowercase()
    }

    /// Everything after the scheme, starting at `://`
    pub(crate) fn url_after_scheme(&self) -> &str {
        &self.url[self.scheme_len..]
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Form fields in signing order
    pub fn form_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.form.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn form_field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    pub fn has_form_fields(&self) -> bool {
        !self.form.is_empty()
    }

    /// Claimed signature. An empty header value counts as absent.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref().filter(|s| !s.is_empty())
    }
}
