//! Strict well-formedness checks following the grammar of [RFC 3986].
//!
//! Unlike URL construction, which is lenient, the functions here reject any
//! character not allowed in its component and any malformed percent-encoded
//! octet. An absolute URL with an authority is required.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/

use crate::pct_enc::{self, table::*, Table};

/// Checks whether the string is a well-formed absolute URL with an authority.
///
/// The authority must contain a non-empty host. Square brackets are accepted
/// unencoded in the query, as they appear in nested field names such as
/// `tag[]=a`.
///
/// # Examples
///
/// ```
/// use url_canon::validate::is_well_formed;
///
/// assert!(is_well_formed("http://example.com/a%20b?q=1#top"));
/// assert!(is_well_formed("http://[2001:db8::7]:8080/"));
/// assert!(is_well_formed("http://example.com/?f[x]=1&tag[]=a"));
/// assert!(!is_well_formed("http://example.com/a b"));
/// assert!(!is_well_formed("example.com/"));
/// assert!(!is_well_formed("http:///path"));
/// assert!(!is_well_formed("foo://user@/path"));
/// ```
#[must_use]
pub fn is_well_formed(s: &str) -> bool {
    check(s).is_ok()
}

/// Checks whether the string is a valid IPv6 address, without brackets.
///
/// # Examples
///
/// ```
/// use url_canon::validate::is_valid_ipv6;
///
/// assert!(is_valid_ipv6("::1"));
/// assert!(is_valid_ipv6("::ffff:192.0.2.1"));
/// assert!(!is_valid_ipv6("1:2:3:4:5:6:7:8:9"));
/// assert!(!is_valid_ipv6("[::1]"));
/// ```
#[must_use]
pub fn is_valid_ipv6(s: &str) -> bool {
    parse_ipv6(s.as_bytes()).is_some()
}

/// Checks whether the string is an IPv4 address in dotted-decimal form.
#[must_use]
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s.as_bytes()).is_some()
}

pub(crate) fn parse_ipv6(bytes: &[u8]) -> Option<[u16; 8]> {
    let mut reader = Reader::new(bytes);
    reader.read_v6().filter(|_| !reader.has_remaining())
}

pub(crate) fn parse_ipv4(bytes: &[u8]) -> Option<u32> {
    let mut reader = Reader::new(bytes);
    reader.read_v4().filter(|_| !reader.has_remaining())
}

const QUERY_WITH_BRACKETS: Table = QUERY.or(Table::new(b"[]"));

/// Validates the string, returning the index of the first offending byte on failure.
pub(crate) fn check(s: &str) -> Result<(), usize> {
    let mut reader = Reader::new(s.as_bytes());
    reader.read_url()?;
    if reader.has_remaining() {
        return Err(reader.pos);
    }
    Ok(())
}

/// URL reader.
///
/// # Invariants
///
/// `pos <= len`. `pos` only moves backward when a read is retried
/// from a saved position.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

enum Seg {
    // *1":" 1*4HEXDIG
    Normal(u16, bool),
    // "::"
    Ellipsis,
    // *1":" 1*4HEXDIG "."
    MaybeV4(bool),
    // ":"
    SingleColon,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Reads as many bytes allowed by the table as possible.
    ///
    /// Returns `Err` with the index of a malformed percent-encoded octet.
    fn read(&mut self, table: Table) -> Result<bool, usize> {
        let start = self.pos;
        let mut i = self.pos;

        while i < self.len() {
            let x = self.bytes[i];
            if x == b'%' && table.allows_pct_encoded() {
                match self.bytes.get(i + 1..i + 3) {
                    Some(&[hi, lo]) if pct_enc::is_hexdig_pair(hi, lo) => i += 3,
                    _ => return Err(i),
                }
            } else if table.allows(x) {
                i += 1;
            } else {
                break;
            }
        }

        self.pos = i;
        Ok(self.pos > start)
    }

    fn read_url(&mut self) -> Result<(), usize> {
        if !matches!(self.peek(0), Some(x) if x.is_ascii_alphabetic()) {
            return Err(self.pos);
        }
        self.skip(1);
        self.read(SCHEME)?;
        if !self.read_str(":") || !self.read_str("//") {
            return Err(self.pos);
        }

        self.read_authority()?;

        self.read(PATH)?;
        if self.read_str("?") {
            self.read(QUERY_WITH_BRACKETS)?;
        }
        if self.read_str("#") {
            self.read(FRAGMENT)?;
        }
        Ok(())
    }

    fn read_authority(&mut self) -> Result<(), usize> {
        let start = self.pos;
        self.read(USERINFO)?;
        if !self.read_str("@") {
            // Not userinfo. Read again as host.
            self.pos = start;
        }

        let host_start = self.pos;
        if self.read_str("[") {
            self.read_ip_literal()?;
        } else {
            self.read(REG_NAME)?;
        }
        if self.pos == host_start {
            return Err(self.pos);
        }

        if self.read_str(":") {
            while matches!(self.peek(0), Some(x) if x.is_ascii_digit()) {
                self.skip(1);
            }
        }

        match self.peek(0) {
            None | Some(b'/' | b'?' | b'#') => Ok(()),
            Some(_) => Err(self.pos),
        }
    }

    fn read_ip_literal(&mut self) -> Result<(), usize> {
        let start = self.pos;
        if self.read_v6().is_none() {
            self.pos = start;
            self.read_ipv_future()?;
        }
        if !self.read_str("]") {
            return Err(self.pos);
        }
        Ok(())
    }

    fn read_ipv_future(&mut self) -> Result<(), usize> {
        if let Some(b'v' | b'V') = self.peek(0) {
            // INVARIANT: Skipping "v" or "V" is fine.
            self.skip(1);
            if self.read(HEXDIG)?
                && self.read_str(".")
                && self.read(UNRESERVED.or(SUB_DELIMS).or(Table::new(b":")))?
            {
                return Ok(());
            }
        }
        Err(self.pos)
    }

    fn read_v6(&mut self) -> Option<[u16; 8]> {
        let mut segs = [0; 8];
        let mut ellipsis_idx = 8;

        let mut i = 0;
        while i < 8 {
            match self.read_v6_segment() {
                Some(Seg::Normal(seg, colon)) => {
                    if colon == (i == 0 || i == ellipsis_idx) {
                        // Leading colon, triple colons, or no colon.
                        return None;
                    }
                    segs[i] = seg;
                    i += 1;
                }
                Some(Seg::Ellipsis) => {
                    if ellipsis_idx != 8 {
                        // Multiple ellipses.
                        return None;
                    }
                    ellipsis_idx = i;
                }
                Some(Seg::MaybeV4(colon)) => {
                    if i > 6 || colon == (i == ellipsis_idx) {
                        // Not enough space, triple colons, or no colon.
                        return None;
                    }
                    let octets = self.read_v4()?.to_be_bytes();
                    segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                    segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                    i += 2;
                    break;
                }
                Some(Seg::SingleColon) => return None,
                None => break,
            }
        }

        if ellipsis_idx == 8 {
            // No ellipsis.
            if i != 8 {
                // Too short.
                return None;
            }
        } else if i == 8 {
            // Eliding nothing.
            return None;
        } else {
            // Shift the segments after the ellipsis to the right.
            for j in (ellipsis_idx..i).rev() {
                segs[8 - (i - j)] = segs[j];
                segs[j] = 0;
            }
        }

        Some(segs)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read_str(":");
        if !self.has_remaining() {
            return colon.then_some(Seg::SingleColon);
        }

        let first = self.peek(0)?;
        let mut x = match pct_enc::decode_hexdigit(first) {
            Some(v) => v as u16,
            _ => {
                return colon.then(|| {
                    if first == b':' {
                        // INVARIANT: Skipping ":" is fine.
                        self.skip(1);
                        Seg::Ellipsis
                    } else {
                        Seg::SingleColon
                    }
                });
            }
        };
        let mut i = 1;

        while i < 4 {
            let Some(b) = self.peek(i) else {
                // INVARIANT: Skipping `i` hexadecimal digits is fine.
                self.skip(i);
                return Some(Seg::Normal(x, colon));
            };
            match pct_enc::decode_hexdigit(b) {
                Some(v) => {
                    x = (x << 4) | v as u16;
                    i += 1;
                }
                _ if b == b'.' => return Some(Seg::MaybeV4(colon)),
                _ => break,
            }
        }
        // INVARIANT: Skipping `i` hexadecimal digits is fine.
        self.skip(i);
        Some(Seg::Normal(x, colon))
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = self.read_v4_octet()? << 24;
        for i in (0..3).rev() {
            if !self.read_str(".") {
                return None;
            }
            addr |= self.read_v4_octet()? << (i * 8);
        }
        Some(addr)
    }

    fn read_v4_octet(&mut self) -> Option<u32> {
        let mut res = self.peek_digit(0)?;
        if res == 0 {
            // INVARIANT: Skipping "0" is fine.
            self.skip(1);
            return Some(0);
        }

        for i in 1..3 {
            let Some(x) = self.peek_digit(i) else {
                // INVARIANT: Skipping `i` digits is fine.
                self.skip(i);
                return Some(res);
            };
            res = res * 10 + x;
        }
        // INVARIANT: Skipping 3 digits is fine.
        self.skip(3);

        u8::try_from(res).is_ok().then_some(res)
    }

    fn peek_digit(&self, i: usize) -> Option<u32> {
        self.peek(i).and_then(|x| (x as char).to_digit(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed() {
        assert!(is_well_formed("http://example.com"));
        assert!(is_well_formed("https://user:pw@example.com:8443/a/b?c=d&e#f"));
        assert!(is_well_formed("ftp://127.0.0.1/"));
        assert!(is_well_formed("http://[v7.fe80::a+en1]/"));
        assert!(is_well_formed("http://[::ffff:127.0.0.1]/"));
    }

    #[test]
    fn ill_formed() {
        assert_eq!(check("http://example.com/%zz"), Err(19));
        assert_eq!(check("http://exa mple.com/"), Err(10));
        assert_eq!(check("1http://example.com/"), Err(0));
        assert_eq!(check("http:example.com"), Err(5));
        assert!(check("http://[::1/").is_err());
        assert!(check("http://[:::1]/").is_err());
        assert!(check("http://example.com:80a/").is_err());
        assert!(check("http://example.com/#a#b").is_err());
        assert!(check("https://").is_err());
        assert_eq!(check("foo://"), Err(6));
        assert_eq!(check("git://user@/repo"), Err(11));
        assert_eq!(check("custom://:8080/x"), Err(9));
    }

    #[test]
    fn ipv4() {
        assert_eq!(parse_ipv4(b"127.0.0.1"), Some(0x7f00_0001));
        assert!(!is_valid_ipv4("256.0.0.1"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("01.2.3.4"));
    }

    #[test]
    fn ipv6() {
        assert_eq!(parse_ipv6(b"::"), Some([0; 8]));
        assert_eq!(parse_ipv6(b"1::"), Some([1, 0, 0, 0, 0, 0, 0, 0]));
        assert_eq!(
            parse_ipv6(b"2001:db8::7"),
            Some([0x2001, 0xdb8, 0, 0, 0, 0, 0, 7])
        );
        assert!(!is_valid_ipv6("1:2:3:4:5:6:7"));
        assert!(!is_valid_ipv6("1::2::3"));
        assert!(!is_valid_ipv6("12345::"));
        assert!(!is_valid_ipv6(":1::"));
    }
}
