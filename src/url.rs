use crate::{component::Host, error::ParseError, path::UrlPath, query::UrlQuery, Normalizer};
use core::{hash, str::FromStr};

/// A parsed and normalized URL.
///
/// A `Url` keeps the components as given alongside their normalized forms.
/// Normalization does the following:
///
/// - Lowercases the scheme, defaulting it to `http` when absent.
/// - Lowercases the host.
/// - Elides the port when it equals the default port of the scheme.
/// - Defaults an empty path to `"/"`.
/// - Decodes percent-encoded unreserved characters and encodes any other
///   character outside the reserved set in the path and the fragment,
///   with uppercase hexadecimal digits.
/// - Recomposes the query from its parsed fields, see [`UrlQuery`].
///
/// The normalized URL always contains a scheme, a host and a path.
///
/// # Comparison
///
/// `Url`s are compared by their normalized forms without fragment.
/// Use [`equals`](Self::equals) to take the fragment into account.
///
/// # Examples
///
/// ```
/// use url_canon::Url;
///
/// let url = Url::parse("HTTP://User@WWW.Example.COM:80/Some%3dite%6D/?b=2&a=1&a=3#Top")?;
///
/// assert_eq!(url.protocol(), Some("HTTP"));
/// assert_eq!(url.normalized_host(), "www.example.com");
/// assert_eq!(url.port(), Some(80));
/// assert_eq!(url.url_path().component(0), Some("Some=item"));
/// assert_eq!(url.normalized_url(), "http://User@www.example.com/Some%3Ditem/?b=2&a=3#Top");
///
/// assert_eq!(url, Url::parse("http://User@www.example.com/Some%3Ditem/?b=2&a=3")?);
/// # Ok::<_, url_canon::ParseError>(())
/// ```
#[derive(Clone)]
pub struct Url {
    pub(crate) raw: String,
    pub(crate) protocol: Option<String>,
    pub(crate) normalized_protocol: String,
    pub(crate) host: String,
    pub(crate) normalized_host: String,
    pub(crate) host_is_bracketed: bool,
    pub(crate) port: Option<u16>,
    pub(crate) path: Option<String>,
    pub(crate) normalized_path: String,
    pub(crate) url_path: UrlPath,
    pub(crate) query: Option<String>,
    pub(crate) normalized_query: Option<String>,
    pub(crate) url_query: UrlQuery,
    pub(crate) fragment: Option<String>,
    pub(crate) normalized_fragment: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) normalized_url: String,
    pub(crate) fragment_start: usize,
}

impl Url {
    /// Parses and normalizes a URL with the default configuration.
    ///
    /// The input is split leniently: characters are not validated. Input
    /// without a scheme is accepted, in which case the host is looked for
    /// after prepending `http://`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the IP literal or the port is malformed,
    /// or if no host can be found.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Normalizer::new().parse(s)
    }

    /// Checks whether the string is a valid URL with the default configuration.
    ///
    /// See [`Normalizer::is_valid`].
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Normalizer::new().is_valid(s)
    }

    /// Returns the URL as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Checks whether a scheme was given.
    #[must_use]
    pub fn has_protocol(&self) -> bool {
        self.protocol.is_some()
    }

    /// Returns the scheme as given.
    #[must_use]
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Returns the lowercased scheme, or the default scheme if none was given.
    #[must_use]
    pub fn normalized_protocol(&self) -> &str {
        &self.normalized_protocol
    }

    /// Returns the host as given, without brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the lowercased host, without brackets.
    #[must_use]
    pub fn normalized_host(&self) -> &str {
        &self.normalized_host
    }

    /// Checks whether the host was enclosed in square brackets.
    #[must_use]
    pub fn host_is_bracketed(&self) -> bool {
        self.host_is_bracketed
    }

    /// Returns the parsed normalized host.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::{Ipv4Addr, Ipv6Addr};
    /// use url_canon::{component::Host, Url};
    ///
    /// let url = Url::parse("http://127.0.0.1/")?;
    /// assert_eq!(url.host_parsed(), Host::Ipv4(Ipv4Addr::LOCALHOST));
    ///
    /// let url = Url::parse("http://[::1]:8080/")?;
    /// assert_eq!(url.host(), "::1");
    /// assert_eq!(url.host_parsed(), Host::Ipv6(Ipv6Addr::LOCALHOST));
    ///
    /// let url = Url::parse("http://Example.com/")?;
    /// assert_eq!(url.host_parsed(), Host::RegName("example.com"));
    /// # Ok::<_, url_canon::ParseError>(())
    /// ```
    #[must_use]
    pub fn host_parsed(&self) -> Host<'_> {
        Host::parse(&self.normalized_host, self.host_is_bracketed)
    }

    /// Checks whether a port was given.
    #[must_use]
    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    /// Returns the port as given, even if it is the default port of the scheme.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Checks whether a non-empty path was given.
    #[must_use]
    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }

    /// Returns the path as given, or `"/"` if none was given.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    /// Returns the segments of the normalized path.
    #[must_use]
    pub fn url_path(&self) -> &UrlPath {
        &self.url_path
    }

    /// Checks whether the query has at least one field.
    ///
    /// A `'?'` followed by nothing parseable does not count as a query.
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Returns the query as given, without the leading `'?'`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the query recomposed from its fields.
    #[must_use]
    pub fn normalized_query_string(&self) -> Option<&str> {
        self.normalized_query.as_deref()
    }

    /// Returns the parsed query.
    #[must_use]
    pub fn url_query(&self) -> &UrlQuery {
        &self.url_query
    }

    /// Checks whether a non-empty fragment was given.
    #[must_use]
    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// Returns the fragment as given, without the leading `'#'`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the normalized fragment.
    #[must_use]
    pub fn normalized_fragment(&self) -> Option<&str> {
        self.normalized_fragment.as_deref()
    }

    /// Checks whether a non-empty user was given.
    #[must_use]
    pub fn has_user(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the user as given.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Checks whether a non-empty password was given.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Returns the password as given.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the normalized URL.
    #[must_use]
    pub fn normalized_url(&self) -> &str {
        &self.normalized_url
    }

    /// Returns the normalized URL without the fragment.
    #[must_use]
    pub fn normalized_url_without_fragment(&self) -> &str {
        &self.normalized_url[..self.fragment_start]
    }

    /// Compares the normalized forms of two URLs, optionally ignoring the fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::Url;
    ///
    /// let a = Url::parse("http://example.com/a#x")?;
    /// let b = Url::parse("HTTP://EXAMPLE.COM:80/a#y")?;
    ///
    /// assert!(a.equals(&b, true));
    /// assert!(!a.equals(&b, false));
    /// # Ok::<_, url_canon::ParseError>(())
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Url, ignore_fragment: bool) -> bool {
        if ignore_fragment {
            self.eq_ignore_fragment(other)
        } else {
            self.normalized_url == other.normalized_url
        }
    }

    /// Compares the normalized forms of two URLs without fragment.
    #[must_use]
    pub fn eq_ignore_fragment(&self, other: &Url) -> bool {
        self.normalized_url_without_fragment() == other.normalized_url_without_fragment()
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.eq_ignore_fragment(other)
    }
}

impl Eq for Url {}

impl hash::Hash for Url {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.normalized_url_without_fragment().hash(state);
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as URL: {e}"))
        })
    }
}
