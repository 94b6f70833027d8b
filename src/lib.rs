//! An interactive zero-knowledge identification scheme (Volte, Patarin
//! and Nachef) whose security reduces to the hardness of factoring an
//! element of a finite permutation group into a bounded-length product
//! of public generators.
//!
//! # Overview
//!
//! The library does two things:
//!
//! - Assist the holder of a factorization witness in proving knowledge
//!   of it, one commit-challenge-answer round at a time ([`Prover`]),
//! - Assist the holder of the public key in checking those rounds and
//!   tracking the residual impersonation probability ([`Verifier`]).
//!
//! A [`params::Params`] preset fixes the group: a public table `F` of
//! generators, a blinding subgroup `H` closed under conjugating `F`, and
//! the witness length `d`. The private key is a sequence of `d` indices
//! into `F`; the public key is the inverse of the corresponding product.
//! Each round an impersonator survives with probability `d/(d+1)`, so
//! rounds are repeated until the bound is small enough.
//!
//! ```
//! use zkp_volte_patarin_nachef::{params, PrivateKey, Prover, Verifier};
//!
//! let params = params::cube_3x3x3();
//! let key = PrivateKey::generate(params, &mut rand::rngs::OsRng);
//! let public = key.public_key();
//!
//! let mut prover = Prover::from(&key);
//! let mut verifier = Verifier::from(&public);
//! for _ in 0..40 {
//!     let commitments = prover.begin_round().to_vec();
//!     let question = verifier.choose_question();
//!     let answer = prover.answer(question).unwrap();
//!     assert!(verifier.verify(&commitments, &answer));
//! }
//! assert!(verifier.impersonation_probability() < 0.2);
//! ```
//!
//! Commitments, public keys and answers all have byte-exact wire
//! representations ([`PublicKey::export`], [`Answer::to_bytes`],
//! [`Verifier::verify_encoded`]), so the two sides can run over any
//! transport.
//!
//! # Capabilities
//!
//! The crate consumes two external primitives: a CSPRNG, passed in as
//! any [`rand::RngCore`] + [`rand::CryptoRng`] (defaulting to
//! [`DefaultRng`]), and HMAC-SHA256 for the round commitments. Neither
//! is implemented here.

/// The prover's reply to a challenge, and its wire format.
mod answer;
/// Byte-exact wire encodings.
mod codec;
/// HMAC-SHA256 commitments.
mod commitment;
/// Failure kinds for out-of-order calls and malformed input.
mod errors;
/// Private and public keys.
mod keys;
/// Parameter presets.
pub mod params;
/// Permutations and interleaved permutation tables.
mod permutation;
/// Prover state machine.
mod prover;
/// Unbiased sampling on top of the CSPRNG.
mod sampler;
/// Verifier state machine.
mod verifier;

/// Unit tests.
#[cfg(test)]
mod tests;

pub use answer::Answer;
pub use errors::{ProtocolError, ProtocolResult};
pub use keys::{PrivateKey, PublicKey};
pub use params::Params;
pub use permutation::Permutation;
pub use prover::Prover;
pub use verifier::Verifier;

/// Default random number generator ([`rand::rngs::OsRng`]).
pub type DefaultRng = rand::rngs::OsRng;
