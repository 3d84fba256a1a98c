//! Lenient splitting of URL text into raw components.
//!
//! No character is validated here. Splitting only fails on a malformed
//! IP literal or port.

use crate::{
    component::Scheme,
    error::{ParseError, ParseErrorKind},
};

/// Raw components of a URL, as slices of the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Parts<'a> {
    pub(crate) scheme: Option<&'a str>,
    pub(crate) user: Option<&'a str>,
    pub(crate) password: Option<&'a str>,
    /// Non-empty. Square brackets of an IP literal are included.
    pub(crate) host: Option<&'a str>,
    pub(crate) port: Option<u16>,
    /// Non-empty.
    pub(crate) path: Option<&'a str>,
    pub(crate) query: Option<&'a str>,
    pub(crate) fragment: Option<&'a str>,
}

enum Hier<'a> {
    /// Starts right after "//", or at a bare "host:port".
    Authority(&'a str),
    Path(&'a str),
}

fn offset(base: &str, sub: &str) -> usize {
    sub.as_ptr() as usize - base.as_ptr() as usize
}

/// Splits URL text into raw components.
///
/// - `scheme://authority/path?query#fragment` is split as usual.
/// - `//authority/path` yields no scheme.
/// - `name:1234/path` is read as a host and a port, not as a scheme.
/// - `scheme:path` and `path` yield no host.
pub(crate) fn split(s: &str) -> Result<Parts<'_>, ParseError> {
    let mut parts = Parts::default();

    let mut rest = s;
    if let Some((before, fragment)) = rest.split_once('#') {
        rest = before;
        parts.fragment = Some(fragment);
    }
    if let Some((before, query)) = rest.split_once('?') {
        rest = before;
        parts.query = Some(query);
    }

    let hier = match rest.strip_prefix("//") {
        Some(auth) => Hier::Authority(auth),
        None => split_scheme(rest, &mut parts.scheme),
    };

    let path = match hier {
        Hier::Authority(auth) => {
            let end = auth.find('/').unwrap_or(auth.len());
            split_authority(s, &auth[..end], &mut parts)?;
            &auth[end..]
        }
        Hier::Path(path) => path,
    };
    parts.path = Some(path).filter(|p| !p.is_empty());

    Ok(parts)
}

fn split_scheme<'a>(rest: &'a str, scheme_out: &mut Option<&'a str>) -> Hier<'a> {
    let Some((scheme, after)) = rest.split_once(':') else {
        return Hier::Path(rest);
    };
    if Scheme::new(scheme).is_none() {
        return Hier::Path(rest);
    }

    if let Some(auth) = after.strip_prefix("//") {
        *scheme_out = Some(scheme);
        return Hier::Authority(auth);
    }

    let maybe_port = after.split('/').next().unwrap_or("");
    if !maybe_port.is_empty() && maybe_port.bytes().all(|x| x.is_ascii_digit()) {
        // "localhost:8080/" has a host and a port.
        Hier::Authority(rest)
    } else {
        *scheme_out = Some(scheme);
        Hier::Path(after)
    }
}

fn split_authority<'a>(s: &'a str, auth: &'a str, parts: &mut Parts<'a>) -> Result<(), ParseError> {
    let host_port = match auth.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            match userinfo.split_once(':') {
                Some((user, password)) => {
                    parts.user = Some(user);
                    parts.password = Some(password);
                }
                None => parts.user = Some(userinfo),
            }
            host_port
        }
        None => auth,
    };

    let (host, port) = if host_port.starts_with('[') {
        let Some(close) = host_port.find(']') else {
            return Err(ParseError::new(
                offset(s, host_port),
                ParseErrorKind::UnclosedIpLiteral,
            ));
        };
        let after = &host_port[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(port) => Some(port),
            None if after.is_empty() => None,
            None => {
                return Err(ParseError::new(
                    offset(s, after),
                    ParseErrorKind::UnexpectedCharAfterIpLiteral,
                ))
            }
        };
        (&host_port[..=close], port)
    } else {
        match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    parts.host = Some(host).filter(|h| !h.is_empty());
    parts.port = match port {
        None | Some("") => None,
        Some(port) => Some(parse_port(port).ok_or_else(|| {
            ParseError::new(offset(s, port), ParseErrorKind::InvalidPort)
        })?),
    };
    Ok(())
}

fn parse_port(s: &str) -> Option<u16> {
    if s.bytes().all(|x| x.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
