/// The crate reports failures through two channels:
/// [`ProtocolError`], for operations called out of order or fed malformed
/// input, and plain booleans for verification outcomes.
/// Three kinds of errors can happen when dealing with [`ProtocolError`]:
///
/// - Invalid state ([`ProtocolError::InvalidState`]):
///   An operation was invoked outside the per-object order, for example
///   requesting an answer before a round was begun, or twice in one round.
///   The object's state is left unchanged.
///
/// - Out-of-range input ([`ProtocolError::OutOfRange`]):
///   A question above `d`, or an index (`tau`, `f`) beyond the preset's
///   `H` or `F` tables.
///
/// - Serialization ([`ProtocolError::SerializationError`]):
///   Imported bytes do not decode to a valid permutation, or have the
///   wrong length for the preset.
///
/// A failed round check is *not* an error: [`crate::Verifier::verify`]
/// returns `false` for any rejection, with no distinction between a MAC
/// mismatch and a malformed answer.
use std::{error::Error, fmt::Display};

/// An operation could not be carried out on the given state or input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// The operation does not apply to the object's current state.
    InvalidState,
    /// A question or table index exceeds the bounds of the preset.
    OutOfRange,
    /// Imported bytes could not be decoded.
    SerializationError,
}

/// The result type for fallible protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

impl Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState => write!(f, "operation invalid in the current state"),
            Self::OutOfRange => write!(f, "question or index out of range"),
            Self::SerializationError => write!(f, "malformed encoding"),
        }
    }
}

impl Error for ProtocolError {}
