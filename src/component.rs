//! URL components.

use crate::{pct_enc::table, validate};
use core::{fmt, hash};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::net::{Ipv4Addr, Ipv6Addr};

/// A [scheme] component.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Comparison
///
/// `Scheme`s are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use url_canon::component::Scheme;
///
/// const SCHEME_HTTP: &Scheme = Scheme::new_or_panic("http");
///
/// let scheme = Scheme::new("HTTP").unwrap();
///
/// // Case-insensitive comparison.
/// assert_eq!(scheme, SCHEME_HTTP);
/// // Case-sensitive comparison.
/// assert_eq!(scheme.as_str(), "HTTP");
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

const SCHEME_HTTP: &Scheme = Scheme::new_validated("http");
const SCHEME_HTTPS: &Scheme = Scheme::new_validated("https");
const SCHEME_FTP: &Scheme = Scheme::new_validated("ftp");

impl Scheme {
    #[ref_cast_custom]
    #[inline]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the conversion fails.
    #[inline]
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.validate(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the well-known default port of the scheme.
    ///
    /// Only `http` (80), `https` (443) and `ftp` (21) are known.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_canon::component::Scheme;
    ///
    /// assert_eq!(Scheme::new_or_panic("HTTPS").default_port(), Some(443));
    /// assert_eq!(Scheme::new_or_panic("gopher").default_port(), None);
    /// ```
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        const DEFAULT_PORTS: &[(&Scheme, u16)] =
            &[(SCHEME_HTTP, 80), (SCHEME_HTTPS, 443), (SCHEME_FTP, 21)];

        DEFAULT_PORTS
            .iter()
            .find(|(scheme, _)| *scheme == self)
            .map(|&(_, port)| port)
    }
}

impl PartialEq for Scheme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl hash::Hash for Scheme {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for x in self.inner.bytes() {
            state.write_u8(x.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// A parsed host.
///
/// Brackets enclosing an IPv6 address are not included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Host<'a> {
    /// An IPv4 address in dotted-decimal form.
    Ipv4(Ipv4Addr),
    /// An IPv6 address enclosed in square brackets.
    Ipv6(Ipv6Addr),
    /// A bracketed literal that is not a valid IPv6 address.
    IpLiteral(&'a str),
    /// A registered name, possibly empty or percent-encoded.
    RegName(&'a str),
}

impl<'a> Host<'a> {
    pub(crate) fn parse(host: &'a str, bracketed: bool) -> Self {
        if bracketed {
            return match validate::parse_ipv6(host.as_bytes()) {
                Some(segs) => Host::Ipv6(segs.into()),
                None => Host::IpLiteral(host),
            };
        }
        match validate::parse_ipv4(host.as_bytes()) {
            Some(addr) => Host::Ipv4(addr.into()),
            None => Host::RegName(host),
        }
    }
}
