//! The prover's reply to a challenge and its wire format.

use crate::codec;
use crate::commitment::COMMITMENT_SIZE;
use crate::errors::{ProtocolError, ProtocolResult};
use crate::params::Params;
use crate::permutation::Permutation;

/// The prover's reply to a challenge, tagged by the question it answers.
///
/// The two variants open different subsets of the round's commitments;
/// neither reveals the private key on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// Reply to `q = 0`: opens the orientation commitment and both ends
    /// of the sigma chain, tying them together through the public key.
    Opening {
        /// Index of the revealed orientation in `H`.
        tau: u32,
        /// The random start of the sigma chain.
        sigma_0: Permutation,
        /// Key opening the orientation commitment.
        k_star: [u8; COMMITMENT_SIZE],
        /// Key opening the commitment to `sigma_0`.
        k_0: [u8; COMMITMENT_SIZE],
        /// Key opening the commitment to `sigma_d`.
        k_d: [u8; COMMITMENT_SIZE],
    },
    /// Reply to `1 ≤ q ≤ d`: opens one adjacent pair of chain
    /// commitments, revealing only a conjugated (blinded) generator.
    Link {
        /// The question this answers.
        q: u32,
        /// Index in `F` of the conjugate `H[tau]⁻¹ ∘ F[i_q] ∘ H[tau]`.
        f: u32,
        /// The chain element at stage `q`.
        sigma_q: Permutation,
        /// Key opening the commitment to `sigma_{q−1}`.
        k_q_minus_1: [u8; COMMITMENT_SIZE],
        /// Key opening the commitment to `sigma_q`.
        k_q: [u8; COMMITMENT_SIZE],
    },
}

fn key_at(bytes: &[u8], offset: usize) -> [u8; COMMITMENT_SIZE] {
    let mut key = [0u8; COMMITMENT_SIZE];
    key.copy_from_slice(&bytes[offset..offset + COMMITMENT_SIZE]);
    key
}

impl Answer {
    /// The question this answer replies to.
    pub fn question(&self) -> u32 {
        match self {
            Answer::Opening { .. } => 0,
            Answer::Link { q, .. } => *q,
        }
    }

    /// Encodes the answer for the wire; see the preset's
    /// [`Params::answer_size`] for the resulting length.
    pub fn to_bytes(&self, params: &Params) -> Vec<u8> {
        let width = params.index_width();
        let perm_size = codec::perm_repr_size(params.domain());
        let mut out = vec![0u8; params.answer_size(self.question())];
        match self {
            Answer::Opening {
                tau,
                sigma_0,
                k_star,
                k_0,
                k_d,
            } => {
                codec::write_index(*tau, &mut out[..width]);
                codec::encode_perm(sigma_0, &mut out[width..width + perm_size]);
                let keys = width + perm_size;
                out[keys..keys + COMMITMENT_SIZE].copy_from_slice(k_star);
                out[keys + COMMITMENT_SIZE..keys + 2 * COMMITMENT_SIZE].copy_from_slice(k_0);
                out[keys + 2 * COMMITMENT_SIZE..].copy_from_slice(k_d);
            }
            Answer::Link {
                f,
                sigma_q,
                k_q_minus_1,
                k_q,
                ..
            } => {
                codec::write_index(*f, &mut out[..width]);
                codec::encode_perm(sigma_q, &mut out[width..width + perm_size]);
                let keys = width + perm_size;
                out[keys..keys + COMMITMENT_SIZE].copy_from_slice(k_q_minus_1);
                out[keys + COMMITMENT_SIZE..].copy_from_slice(k_q);
            }
        }
        out
    }

    /// Decodes an answer to question `q`, rejecting wrong lengths,
    /// out-of-range indices and invalid permutations.
    pub fn from_bytes(params: &Params, q: u32, bytes: &[u8]) -> ProtocolResult<Self> {
        if q > params.d() {
            return Err(ProtocolError::OutOfRange);
        }
        if bytes.len() != params.answer_size(q) {
            return Err(ProtocolError::SerializationError);
        }

        let width = params.index_width();
        let perm_size = codec::perm_repr_size(params.domain());
        let index = codec::read_index(&bytes[..width]);
        let sigma = codec::decode_perm(params.domain(), &bytes[width..width + perm_size])
            .ok_or(ProtocolError::SerializationError)?;
        let keys = width + perm_size;

        if q == 0 {
            if index >= params.h.count() {
                return Err(ProtocolError::OutOfRange);
            }
            Ok(Answer::Opening {
                tau: index,
                sigma_0: sigma,
                k_star: key_at(bytes, keys),
                k_0: key_at(bytes, keys + COMMITMENT_SIZE),
                k_d: key_at(bytes, keys + 2 * COMMITMENT_SIZE),
            })
        } else {
            if index >= params.f.count() {
                return Err(ProtocolError::OutOfRange);
            }
            Ok(Answer::Link {
                q,
                f: index,
                sigma_q: sigma,
                k_q_minus_1: key_at(bytes, keys),
                k_q: key_at(bytes, keys + COMMITMENT_SIZE),
            })
        }
    }
}
