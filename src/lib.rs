#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

//! URL parsing, normalization and recomposition.
//!
//! A [`Url`] is parsed leniently from text, possibly lacking a scheme, and
//! keeps both the components as given and a normalized form fit for
//! comparison and deduplication. The path and the query are also available
//! as standalone builders, [`UrlPath`] and [`UrlQuery`].
//!
//! Two flavors of percent-encoding are used, see [`pct_enc`]:
//! the structural one for paths and fragments, where a space is `%20`,
//! and the form one for queries, where a space is `+`.
//!
//! # Examples
//!
//! ```
//! use url_canon::{QueryValue, Url};
//!
//! let url = Url::parse("HTTP://Example.COM:80/a%7eb/?f[x]=1&f[y]=2&tag[]=a&tag[]=b")?;
//! assert_eq!(
//!     url.normalized_url(),
//!     "http://example.com/a~b/?f[x]=1&f[y]=2&tag[]=a&tag[]=b"
//! );
//!
//! let f = url.url_query().get("f").unwrap();
//! assert_eq!(f.get("y"), Some(&QueryValue::from("2")));
//! # Ok::<_, url_canon::ParseError>(())
//! ```
//!
//! # Logging
//!
//! Events are emitted with [`tracing`]. No subscriber is installed.
//!
//! # Feature flags
//!
//! - `serde`: Enables [`serde`] support for [`Url`], [`UrlPath`],
//!   [`UrlQuery`] and [`QueryValue`].
//!
//! [`serde`]: https://docs.rs/serde

pub mod component;
pub mod pct_enc;
pub mod query;
pub mod validate;

mod error;
mod fmt;
mod normalize;
mod path;
mod split;
mod url;

pub use error::{ParseError, ParseErrorKind, PathError};
pub use normalize::Normalizer;
pub use path::{PathCursor, UrlPath};
pub use query::{QueryValue, UrlQuery};
pub use url::Url;
