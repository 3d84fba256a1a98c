//! Percent-encoding utilities.
//!
//! Two flavors are provided, selected with a type implementing [`Encoder`]:
//!
//! - [`Structural`]: for the path and the fragment. A space is `%20`.
//! - [`Form`]: for query field names and values. A space is `+`.
//!
//! Both leave the unreserved set (`A-Za-z0-9-._~`) unencoded and always
//! emit uppercase hexadecimal digits.
//!
//! [`Structural`]: encoder::Structural
//! [`Form`]: encoder::Form
//!
//! # Examples
//!
//! ```
//! use url_canon::pct_enc::{self, encoder::{Form, Structural}};
//!
//! assert_eq!(pct_enc::encode_str::<Structural>("a b+c"), "a%20b%2Bc");
//! assert_eq!(pct_enc::encode_str::<Form>("a b+c"), "a+b%2Bc");
//!
//! assert_eq!(pct_enc::decode_lossy::<Structural>("a+b%20c"), "a+b c");
//! assert_eq!(pct_enc::decode_lossy::<Form>("a+b%20c"), "a b c");
//! ```

pub mod encoder;
pub mod table;

pub use encoder::Encoder;
pub use table::Table;

use core::{iter::FusedIterator, marker::PhantomData};
use encoder::Structural;
use std::borrow::Cow;

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

pub(crate) const fn is_hexdig(x: u8) -> bool {
    OCTET_TABLE_LO[x as usize] != 0xff
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

pub(crate) const fn decode_hexdigit(x: u8) -> Option<u8> {
    match OCTET_TABLE_LO[x as usize] {
        0xff => None,
        v => Some(v),
    }
}

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match core::str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

/// Percent-encodes a byte sequence with the given flavor, appending to `buf`.
pub fn encode_to<E: Encoder>(bytes: &[u8], buf: &mut String) {
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        while i < bytes.len() && E::TABLE.allows(bytes[i]) {
            i += 1;
        }
        if i > start {
            // Allowed bytes are all ASCII.
            buf.extend(bytes[start..i].iter().map(|&x| x as char));
        }
        if let Some(&x) = bytes.get(i) {
            if E::SPACE_AS_PLUS && x == b' ' {
                buf.push('+');
            } else {
                buf.push_str(encode_byte(x));
            }
            i += 1;
        }
    }
}

/// Percent-encodes a byte sequence with the given flavor.
#[must_use]
pub fn encode<E: Encoder>(bytes: &[u8]) -> String {
    let mut buf = String::with_capacity(bytes.len());
    encode_to::<E>(bytes, &mut buf);
    buf
}

/// Percent-encodes a string slice with the given flavor.
#[must_use]
pub fn encode_str<E: Encoder>(s: &str) -> String {
    encode::<E>(s.as_bytes())
}

/// Decodes a percent-encoded string slice to bytes.
///
/// A `'%'` not followed by two hexadecimal digits is kept as is.
/// This function allocates only when there is anything to decode.
#[must_use]
pub fn decode<E: Encoder>(s: &str) -> Cow<'_, [u8]> {
    Decode::<E>::new(s).to_bytes()
}

/// Decodes a percent-encoded string slice to a string, replacing any
/// invalid UTF-8 sequences with [`U+FFFD REPLACEMENT CHARACTER`][U+FFFD].
///
/// [U+FFFD]: char::REPLACEMENT_CHARACTER
#[must_use]
pub fn decode_lossy<E: Encoder>(s: &str) -> Cow<'_, str> {
    match decode::<E>(s) {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Cow::Owned(s),
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        },
    }
}

/// Normalizes the percent-encoding of a path or fragment.
///
/// Reserved characters (`:/?#[]@!$&'()*+,;=`) are left untouched. Every run
/// of other bytes is decoded and then re-encoded with [`Structural`], so that
/// unreserved bytes appear unencoded, everything else appears encoded,
/// and hexadecimal digits are uppercase.
///
/// # Examples
///
/// ```
/// use url_canon::pct_enc::normalize_component;
///
/// assert_eq!(normalize_component("some%3dite%6D"), "some%3Ditem");
/// assert_eq!(normalize_component("/a b/%7euser;v=1"), "/a%20b/~user;v=1");
/// ```
#[must_use]
pub fn normalize_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut buf = String::with_capacity(s.len());

    let mut i = 0;
    while i < bytes.len() {
        if table::RESERVED.allows(bytes[i]) {
            buf.push(bytes[i] as char);
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !table::RESERVED.allows(bytes[i]) {
            i += 1;
        }
        // Run boundaries are ASCII bytes, hence char boundaries.
        encode_to::<Structural>(&decode::<Structural>(&s[start..i]), &mut buf);
    }
    buf
}

/// An iterator used to decode a percent-encoded string slice.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub(crate) struct Decode<'a, E: Encoder> {
    source: &'a str,
    encoder: PhantomData<E>,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecodedChunk<'a> {
    /// A subslice with nothing to decode.
    Unencoded(&'a str),
    /// A decoded byte, from a percent-encoded octet or a `'+'`.
    Decoded(u8),
}

impl<'a, E: Encoder> Decode<'a, E> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            encoder: PhantomData,
        }
    }

    fn is_special(&self, i: usize) -> bool {
        let bytes = self.source.as_bytes();
        match bytes[i] {
            b'%' => matches!(bytes.get(i + 1..i + 3), Some(&[hi, lo]) if is_hexdig_pair(hi, lo)),
            b'+' => E::SPACE_AS_PLUS,
            _ => false,
        }
    }

    fn next_special(&self) -> usize {
        (0..self.source.len())
            .find(|&i| self.is_special(i))
            .unwrap_or(self.source.len())
    }

    fn to_bytes(mut self) -> Cow<'a, [u8]> {
        let i = self.next_special();
        if i == self.source.len() {
            return Cow::Borrowed(self.source.as_bytes());
        }

        let mut buf = Vec::with_capacity(self.source.len());
        buf.extend_from_slice(&self.source.as_bytes()[..i]);
        self.source = &self.source[i..];

        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::Decoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }
}

impl<'a, E: Encoder> Iterator for Decode<'a, E> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            return None;
        }

        let i = self.next_special();
        if i > 0 {
            let s;
            (s, self.source) = self.source.split_at(i);
            return Some(DecodedChunk::Unencoded(s));
        }

        let bytes = self.source.as_bytes();
        if bytes[0] == b'+' {
            self.source = &self.source[1..];
            Some(DecodedChunk::Decoded(b' '))
        } else {
            let x = decode_octet(bytes[1], bytes[2]);
            self.source = &self.source[3..];
            Some(DecodedChunk::Decoded(x))
        }
    }
}

impl<E: Encoder> FusedIterator for Decode<'_, E> {}
