//! Prover state machine.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::answer::Answer;
use crate::codec;
use crate::commitment::{self, COMMITMENT_SIZE};
use crate::errors::{ProtocolError, ProtocolResult};
use crate::keys::PrivateKey;
use crate::permutation::{Permutation, MAX_DOMAIN};
use crate::sampler::rand_less_than;
use crate::DefaultRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Idle,
    Committed,
    Answered,
}

/// The prover's side of the identification protocol.
///
/// A prover holds a private key and walks through rounds of
/// `begin_round` (producing commitments) followed by exactly one
/// [`Prover::answer`] for the verifier's question. All round buffers are
/// allocated once at construction and reused.
///
/// Unless specified otherwise, the prover draws its secrets from
/// [`DefaultRng`]:
///
/// ```
/// use zkp_volte_patarin_nachef::{params, PrivateKey, Prover};
///
/// let params = params::cube_3x3x3();
/// let key = PrivateKey::generate(params, &mut rand::rngs::OsRng);
/// let mut prover = Prover::from(&key);
/// let commitments = prover.begin_round().to_vec();
/// assert_eq!(commitments.len(), params.commitments_size());
/// ```
pub struct Prover<'a, R = DefaultRng>
where
    R: RngCore + CryptoRng,
{
    key: &'a PrivateKey,
    csrng: R,
    stage: Stage,
    tau: u32,
    sigma: Vec<Permutation>,
    keys: Zeroizing<Vec<u8>>,
    commitments: Vec<u8>,
    conjugate: Permutation,
}

impl<'a, R: RngCore + CryptoRng> Prover<'a, R> {
    /// Creates a prover for `key`, drawing round secrets from `csrng`.
    pub fn new(key: &'a PrivateKey, csrng: R) -> Self {
        let params = key.params();
        let d = params.d() as usize;
        let domain = params.domain() as usize;
        Self {
            key,
            csrng,
            stage: Stage::Idle,
            tau: 0,
            sigma: vec![Permutation::identity(domain); d + 1],
            keys: Zeroizing::new(vec![0u8; (d + 2) * COMMITMENT_SIZE]),
            commitments: vec![0u8; (d + 2) * COMMITMENT_SIZE],
            conjugate: Permutation::identity(domain),
        }
    }

    /// Begins a round: samples the round secrets, derives the sigma
    /// chain and returns the commitments block to send to the verifier.
    ///
    /// Calling this again abandons the current round.
    pub fn begin_round(&mut self) -> &[u8] {
        let params = self.key.params();
        let d = params.d() as usize;

        self.tau = rand_less_than(&mut self.csrng, params.h.count());
        params
            .g_prime
            .sample_into(params, &mut self.csrng, &mut self.sigma[0]);

        // sigma_j = sigma_{j-1} ∘ (H[tau]⁻¹ ∘ F[i_j] ∘ H[tau])⁻¹
        for j in 1..=d {
            let (head, tail) = self.sigma.split_at_mut(j);
            let sigma_j = &mut tail[0];
            sigma_j.set_identity();
            sigma_j.compose_indexed_inverse(&params.h, self.tau);
            sigma_j.compose_indexed(&params.f, self.key.index(j - 1));
            sigma_j.compose_indexed(&params.h, self.tau);
            sigma_j.invert();
            sigma_j.compose(&head[j - 1]);
        }

        self.csrng.fill_bytes(&mut self.keys);

        let mut repr_buf = [0u8; 2 * MAX_DOMAIN];
        let repr = &mut repr_buf[..codec::perm_repr_size(params.domain())];

        codec::encode_array_entry(&params.h, self.tau, repr);
        commitment::commit(
            &self.keys[..COMMITMENT_SIZE],
            repr,
            &mut self.commitments[..COMMITMENT_SIZE],
        );
        for j in 0..=d {
            codec::encode_perm(&self.sigma[j], repr);
            let at = (j + 1) * COMMITMENT_SIZE;
            commitment::commit(
                &self.keys[at..at + COMMITMENT_SIZE],
                repr,
                &mut self.commitments[at..at + COMMITMENT_SIZE],
            );
        }

        self.stage = Stage::Committed;
        &self.commitments
    }

    /// Produces the answer to question `q` for the current round.
    ///
    /// Refuses with [`ProtocolError::InvalidState`] unless a round is in
    /// progress and unanswered, and with [`ProtocolError::OutOfRange`]
    /// for `q > d`.
    pub fn answer(&mut self, q: u32) -> ProtocolResult<Answer> {
        if self.stage != Stage::Committed {
            return Err(ProtocolError::InvalidState);
        }
        let params = self.key.params();
        let d = params.d();

        let answer = if q == 0 {
            Answer::Opening {
                tau: self.tau,
                sigma_0: self.sigma[0].clone(),
                k_star: self.key_block(0),
                k_0: self.key_block(1),
                k_d: self.key_block(d as usize + 1),
            }
        } else if q <= d {
            self.conjugate.set_identity();
            self.conjugate.compose_indexed_inverse(&params.h, self.tau);
            self.conjugate
                .compose_indexed(&params.f, self.key.index(q as usize - 1));
            self.conjugate.compose_indexed(&params.h, self.tau);
            let f = params
                .f
                .index_of(&self.conjugate)
                .expect("conjugate of a generator missing from F: parameter tables are corrupted");
            Answer::Link {
                q,
                f,
                sigma_q: self.sigma[q as usize].clone(),
                k_q_minus_1: self.key_block(q as usize),
                k_q: self.key_block(q as usize + 1),
            }
        } else {
            return Err(ProtocolError::OutOfRange);
        };

        self.stage = Stage::Answered;
        Ok(answer)
    }

    fn key_block(&self, j: usize) -> [u8; COMMITMENT_SIZE] {
        let mut out = [0u8; COMMITMENT_SIZE];
        out.copy_from_slice(&self.keys[j * COMMITMENT_SIZE..(j + 1) * COMMITMENT_SIZE]);
        out
    }
}

impl<'a> From<&'a PrivateKey> for Prover<'a, DefaultRng> {
    fn from(key: &'a PrivateKey) -> Self {
        Prover::new(key, DefaultRng::default())
    }
}
