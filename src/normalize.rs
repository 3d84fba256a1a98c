//! Module for normalization.

use crate::{
    component::Scheme,
    error::{ParseError, ParseErrorKind},
    path::UrlPath,
    pct_enc,
    query::UrlQuery,
    split::{self, Parts},
    validate, Url,
};
use std::borrow::Cow;

const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");

/// A configurable URL parser and normalizer.
///
/// [`Url::parse`] and [`Url::is_valid`] use the default configuration.
#[derive(Clone, Copy)]
#[allow(missing_debug_implementations)]
#[must_use]
pub struct Normalizer {
    default_scheme: &'static Scheme,
    allow_missing_scheme: bool,
    sort_query: bool,
    default_port_f: fn(&Scheme) -> Option<u16>,
}

impl Normalizer {
    /// Creates a new `Normalizer` with default configuration.
    pub fn new() -> Self {
        Self {
            default_scheme: SCHEME_HTTP,
            allow_missing_scheme: true,
            sort_query: false,
            default_port_f: Scheme::default_port,
        }
    }

    /// Sets the scheme assumed when the input has none.
    ///
    /// This defaults to `http`.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::{component::Scheme, Normalizer};
    ///
    /// let normalizer = Normalizer::new().default_scheme(Scheme::new_or_panic("https"));
    /// let url = normalizer.parse("Example.com:443/a")?;
    ///
    /// assert!(!url.has_protocol());
    /// assert_eq!(url.normalized_url(), "https://example.com/a");
    /// # Ok::<_, url_canon::ParseError>(())
    /// ```
    pub fn default_scheme(mut self, scheme: &'static Scheme) -> Self {
        self.default_scheme = scheme;
        self
    }

    /// Sets whether [`is_valid`](Self::is_valid) accepts input without a scheme.
    ///
    /// This defaults to `true`, in which case the default scheme is
    /// prepended before validation.
    pub fn allow_missing_scheme(mut self, value: bool) -> Self {
        self.allow_missing_scheme = value;
        self
    }

    /// Sets whether to sort query fields in the normalized URL.
    ///
    /// This defaults to `false`. When set, fields are stably sorted by name,
    /// case-insensitively in natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::Normalizer;
    ///
    /// let url = Normalizer::new().sort_query(true).parse("http://a/?b=2&a=1&a=3")?;
    /// assert_eq!(url.normalized_query_string(), Some("a=3&b=2"));
    /// # Ok::<_, url_canon::ParseError>(())
    /// ```
    pub fn sort_query(mut self, value: bool) -> Self {
        self.sort_query = value;
        self
    }

    /// Sets the function with which to get the default port of a scheme.
    ///
    /// This defaults to [`Scheme::default_port`].
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::{component::Scheme, Normalizer};
    ///
    /// const SCHEME_FOO: &Scheme = Scheme::new_or_panic("foo");
    ///
    /// let normalizer = Normalizer::new().default_port_with(|scheme| {
    ///     if scheme == SCHEME_FOO {
    ///         Some(4673)
    ///     } else {
    ///         scheme.default_port()
    ///     }
    /// });
    /// let url = normalizer.parse("foo://localhost:4673")?;
    ///
    /// assert_eq!(url.normalized_url(), "foo://localhost/");
    /// # Ok::<_, url_canon::ParseError>(())
    /// ```
    pub fn default_port_with(mut self, f: fn(&Scheme) -> Option<u16>) -> Self {
        self.default_port_f = f;
        self
    }

    /// Parses and normalizes a URL.
    ///
    /// See [`Url::parse`] for the exact behavior of this method.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the IP literal or the port is malformed,
    /// or if no host can be found.
    pub fn parse(&self, s: &str) -> Result<Url, ParseError> {
        let with_scheme: String;
        let mut parts = split::split(s)?;

        if parts.scheme.is_none() && parts.host.is_none() {
            tracing::debug!(
                url = s,
                scheme = %self.default_scheme,
                "no host found, retrying with default scheme"
            );
            with_scheme = format!("{}://{s}", self.default_scheme);
            let prefix_len = with_scheme.len() - s.len();

            parts = split::split(&with_scheme).map_err(|e| {
                ParseError::new(e.index.saturating_sub(prefix_len), e.kind)
            })?;
            parts.scheme = None;
        }

        let url = normalize(s, parts, self)?;
        tracing::trace!(url = s, normalized = url.normalized_url(), "normalized url");
        Ok(url)
    }

    /// Checks whether the string is a valid URL.
    ///
    /// Input without a scheme is accepted only when
    /// [`allow_missing_scheme`](Self::allow_missing_scheme) is set, in which
    /// case the default scheme is prepended (as `scheme:` before `//host`,
    /// and as `scheme://` otherwise). The result must then be a well-formed
    /// absolute URL with a non-empty host, see [`validate::is_well_formed`].
    ///
    /// Whenever this returns `true`, [`parse`](Self::parse) succeeds.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::Normalizer;
    ///
    /// let normalizer = Normalizer::new();
    /// assert!(normalizer.is_valid("example.com/a?b#c"));
    /// assert!(normalizer.is_valid("http://[2001:db8::1]:8080/"));
    /// assert!(!normalizer.is_valid("http://exa mple.com/"));
    ///
    /// let strict = normalizer.allow_missing_scheme(false);
    /// assert!(!strict.is_valid("example.com/"));
    /// ```
    #[must_use]
    pub fn is_valid(&self, s: &str) -> bool {
        let parts = match split::split(s) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::debug!(url = s, error = %e, "invalid url: unsplittable");
                return false;
            }
        };

        let candidate = if parts.scheme.is_some() {
            Cow::Borrowed(s)
        } else if !self.allow_missing_scheme {
            tracing::debug!(url = s, "invalid url: missing scheme");
            return false;
        } else if s.starts_with("//") {
            Cow::Owned(format!("{}:{s}", self.default_scheme))
        } else {
            Cow::Owned(format!("{}://{s}", self.default_scheme))
        };

        match split::split(&candidate) {
            Ok(Parts {
                scheme: Some(_),
                host: Some(_),
                ..
            }) => {}
            Ok(Parts { scheme: None, .. }) => {
                tracing::debug!(url = s, "invalid url: missing scheme");
                return false;
            }
            Ok(_) => {
                tracing::debug!(url = s, "invalid url: missing host");
                return false;
            }
            Err(e) => {
                tracing::debug!(url = s, error = %e, "invalid url: unsplittable");
                return false;
            }
        }

        match validate::check(&candidate) {
            Ok(()) => true,
            Err(index) => {
                tracing::debug!(url = s, candidate = %candidate, index, "invalid url: ill-formed");
                false
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(raw: &str, parts: Parts<'_>, config: &Normalizer) -> Result<Url, ParseError> {
    let Some(host) = parts.host else {
        return Err(ParseError::new(raw.len(), ParseErrorKind::MissingHost));
    };

    let (host, host_is_bracketed) = match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => (inner, true),
        None => (host, false),
    };

    let scheme = parts
        .scheme
        .and_then(Scheme::new)
        .unwrap_or(config.default_scheme);
    let normalized_protocol = scheme.as_str().to_ascii_lowercase();
    let normalized_host = host.to_ascii_lowercase();

    let normalized_path = pct_enc::normalize_component(parts.path.unwrap_or("/"));
    // A path following an authority always starts with '/'.
    let url_path = UrlPath::parse(&normalized_path).unwrap_or_default();

    let mut url_query = parts.query.map(UrlQuery::parse).unwrap_or_default();
    if config.sort_query {
        url_query.sort();
    }
    let (query, normalized_query) = if url_query.is_empty() {
        (None, None)
    } else {
        (parts.query, Some(url_query.query_string()))
    };

    let fragment = parts.fragment.filter(|f| !f.is_empty());
    let normalized_fragment = fragment.map(pct_enc::normalize_component);

    let user = parts.user.filter(|u| !u.is_empty());
    let password = parts.password.filter(|p| !p.is_empty());
    let shown_port = parts
        .port
        .filter(|&port| Some(port) != (config.default_port_f)(scheme));

    let mut buf = String::with_capacity(raw.len() + 16);
    buf.push_str(&normalized_protocol);
    buf.push_str("://");
    if user.is_some() || password.is_some() {
        buf.push_str(user.unwrap_or_default());
        if let Some(password) = password {
            buf.push(':');
            buf.push_str(password);
        }
        buf.push('@');
    }
    if host_is_bracketed {
        buf.push('[');
        buf.push_str(&normalized_host);
        buf.push(']');
    } else {
        buf.push_str(&normalized_host);
    }
    if let Some(port) = shown_port {
        buf.push(':');
        buf.push_str(&port.to_string());
    }
    buf.push_str(&normalized_path);
    if let Some(query) = &normalized_query {
        buf.push('?');
        buf.push_str(query);
    }
    let fragment_start = buf.len();
    if let Some(fragment) = &normalized_fragment {
        buf.push('#');
        buf.push_str(fragment);
    }

    Ok(Url {
        raw: raw.to_owned(),
        protocol: parts.scheme.map(str::to_owned),
        normalized_protocol,
        host: host.to_owned(),
        normalized_host,
        host_is_bracketed,
        port: parts.port,
        path: parts.path.map(str::to_owned),
        normalized_path,
        url_path,
        query: query.map(str::to_owned),
        normalized_query,
        url_query,
        fragment: fragment.map(str::to_owned),
        normalized_fragment,
        user: user.map(str::to_owned),
        password: password.map(str::to_owned),
        normalized_url: buf,
        fragment_start,
    })
}
