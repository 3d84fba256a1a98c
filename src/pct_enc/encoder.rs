//! Percent-encoders for URL components.

use super::table::{self, Table};

/// A trait used by the encoding and decoding functions to specify
/// the flavor of percent-encoding.
pub trait Encoder: Send + Sync + 'static {
    /// The bytes left unencoded.
    const TABLE: Table;

    /// Whether a space is written as `+` and `+` is read as a space.
    const SPACE_AS_PLUS: bool;
}

/// An encoder for structural components: path and fragment.
///
/// Every byte outside the unreserved set is percent-encoded, a space
/// included (`%20`). `+` is never read as a space.
#[derive(Clone, Copy, Debug)]
pub struct Structural(());

impl Encoder for Structural {
    const TABLE: Table = table::UNRESERVED;
    const SPACE_AS_PLUS: bool = false;
}

/// An encoder for form data: query field names and values.
///
/// Same as [`Structural`] except that a space is encoded as `+`,
/// and both `+` and `%20` decode to a space.
#[derive(Clone, Copy, Debug)]
pub struct Form(());

impl Encoder for Form {
    const TABLE: Table = table::UNRESERVED;
    const SPACE_AS_PLUS: bool = true;
}
