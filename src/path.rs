//! The path component as a sequence of segments.

use crate::{
    error::PathError,
    pct_enc::{self, encoder::Structural},
};
use core::{fmt, iter::FusedIterator, str::FromStr};

/// A path split into literal segments.
///
/// Segments are stored decoded. A trailing `'/'` yields a trailing empty
/// segment, so the number of segments always equals the number of
/// `'/'`-delimited tokens after the leading `'/'`.
///
/// Sequential reading is done through a separate [`PathCursor`], which
/// leaves the path itself untouched.
///
/// # Examples
///
/// ```
/// use url_canon::UrlPath;
///
/// let path: UrlPath = "/a/b%20c/".parse()?;
/// assert_eq!(path.num_components(), 3);
/// assert_eq!(path.component(1), Some("b c"));
/// assert_eq!(path.component(2), Some(""));
///
/// let mut cursor = path.cursor();
/// assert_eq!(cursor.next_component(), Some("a"));
/// assert_eq!(cursor.position(), 1);
/// assert_eq!(path.path_string(), "/a/b%20c/");
/// # Ok::<_, url_canon::PathError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UrlPath {
    segments: Vec<String>,
}

impl UrlPath {
    /// Creates an empty path, composing to `"/"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a path string into literal segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the path does not start with `'/'`.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(PathError::NotAbsolute);
        };
        let segments = rest
            .split('/')
            .map(|seg| pct_enc::decode_lossy::<Structural>(seg).into_owned())
            .collect();
        Ok(Self { segments })
    }

    /// Appends a literal segment.
    pub fn add_component(&mut self, segment: impl Into<String>) -> &mut Self {
        self.segments.push(segment.into());
        self
    }

    /// Returns the literal segment at the given position, if any.
    #[must_use]
    pub fn component(&self, pos: usize) -> Option<&str> {
        self.segments.get(pos).map(String::as_str)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.segments.len()
    }

    /// Checks whether there is no segment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the literal segments.
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.segments.iter().map(String::as_str)
    }

    /// Returns a cursor positioned at the first segment.
    #[must_use]
    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            path: self,
            pos: 0,
        }
    }

    /// Composes the path string, percent-encoding every segment.
    ///
    /// The result always starts with `'/'`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut buf = String::from("/");
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                buf.push('/');
            }
            pct_enc::encode_to::<Structural>(seg.as_bytes(), &mut buf);
        }
        buf
    }
}

impl FromStr for UrlPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_string())
    }
}

impl<S: Into<String>> FromIterator<S> for UrlPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A read cursor over the segments of a [`UrlPath`].
///
/// This struct is created by [`UrlPath::cursor`].
#[derive(Clone, Debug)]
pub struct PathCursor<'a> {
    path: &'a UrlPath,
    pos: usize,
}

impl<'a> PathCursor<'a> {
    /// Returns the segment at the cursor and advances it.
    ///
    /// Returns `None` once the cursor is past the end.
    pub fn next_component(&mut self) -> Option<&'a str> {
        let seg = self.path.component(self.pos)?;
        self.pos += 1;
        Some(seg)
    }

    /// Checks whether every segment has been read.
    #[must_use]
    pub fn is_pos_past_end(&self) -> bool {
        self.pos >= self.path.num_components()
    }

    /// Returns the position of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the segments not yet read.
    #[must_use]
    pub fn remaining(&self) -> &'a [String] {
        self.path.segments.get(self.pos..).unwrap_or_default()
    }
}

impl<'a> Iterator for PathCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.next_component()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining().len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for PathCursor<'_> {}

impl FusedIterator for PathCursor<'_> {}

#[cfg(feature = "serde")]
impl serde::Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.path_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&s).map_err(|e| {
            serde::de::Error::custom(format_args!("failed to parse {s:?} as path: {e}"))
        })
    }
}
