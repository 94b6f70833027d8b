//! Verifier state machine.

use rand::{CryptoRng, RngCore};

use crate::answer::Answer;
use crate::codec;
use crate::commitment::{self, COMMITMENT_SIZE};
use crate::keys::PublicKey;
use crate::permutation::{Permutation, MAX_DOMAIN};
use crate::sampler::rand_less_than;
use crate::DefaultRng;

/// The verifier's side of the identification protocol.
///
/// A verifier holds a public key and alternates
/// [`Verifier::choose_question`] with exactly one [`Verifier::verify`]
/// (or [`Verifier::verify_encoded`]) per round. Passing rounds accumulate
/// in [`Verifier::successful_rounds`], which drives the reported
/// impersonation probability toward zero.
pub struct Verifier<'a, R = DefaultRng>
where
    R: RngCore + CryptoRng,
{
    key: &'a PublicKey,
    csrng: R,
    question: Option<u32>,
    successful_rounds: u32,
}

impl<'a, R: RngCore + CryptoRng> Verifier<'a, R> {
    /// Creates a verifier for `key`, drawing challenges from `csrng`.
    pub fn new(key: &'a PublicKey, csrng: R) -> Self {
        Self {
            key,
            csrng,
            question: None,
            successful_rounds: 0,
        }
    }

    /// Samples the challenge for the current round, uniform on
    /// `{0, …, d}`.
    pub fn choose_question(&mut self) -> u32 {
        let q = rand_less_than(&mut self.csrng, self.key.params.d() + 1);
        self.question = Some(q);
        q
    }

    /// Checks `answer` against the round's `commitments`.
    ///
    /// Returns `false` for any rejection: no pending question, a
    /// question mismatch, out-of-range indices, invalid permutations, or
    /// MAC mismatches (compared in constant time). The pending question
    /// is consumed either way.
    pub fn verify(&mut self, commitments: &[u8], answer: &Answer) -> bool {
        let Some(q) = self.question.take() else {
            return false;
        };
        if answer.question() != q {
            return false;
        }
        let params = self.key.params;
        if commitments.len() != params.commitments_size() {
            return false;
        }

        let d = params.d() as usize;
        let mut repr_buf = [0u8; 2 * MAX_DOMAIN];
        let repr = &mut repr_buf[..codec::perm_repr_size(params.domain())];

        let ok = match answer {
            Answer::Opening {
                tau,
                sigma_0,
                k_star,
                k_0,
                k_d,
            } => {
                if *tau >= params.h.count()
                    || sigma_0.domain() != params.domain() as usize
                    || !sigma_0.is_valid()
                {
                    return false;
                }

                // sigma_d = H[tau]⁻¹ ∘ x0 ∘ H[tau] ∘ sigma_0
                let mut sigma_d = Permutation::identity(params.domain() as usize);
                sigma_d.compose_indexed_inverse(&params.h, *tau);
                sigma_d.compose(&self.key.x0);
                sigma_d.compose_indexed(&params.h, *tau);
                sigma_d.compose(sigma_0);

                codec::encode_array_entry(&params.h, *tau, repr);
                let mut ok =
                    commitment::verify_commitment(k_star, repr, &commitments[..COMMITMENT_SIZE]);

                codec::encode_perm(sigma_0, repr);
                ok &= commitment::verify_commitment(
                    k_0,
                    repr,
                    &commitments[COMMITMENT_SIZE..2 * COMMITMENT_SIZE],
                );

                codec::encode_perm(&sigma_d, repr);
                ok &= commitment::verify_commitment(
                    k_d,
                    repr,
                    &commitments[(d + 1) * COMMITMENT_SIZE..],
                );
                ok
            }
            Answer::Link {
                q,
                f,
                sigma_q,
                k_q_minus_1,
                k_q,
            } => {
                if *f >= params.f.count()
                    || sigma_q.domain() != params.domain() as usize
                    || !sigma_q.is_valid()
                {
                    return false;
                }
                let q = *q as usize;

                // sigma_{q-1} = F[f] ∘ sigma_q
                let mut sigma_prev = Permutation::identity(params.domain() as usize);
                params.f.extract_into(*f, &mut sigma_prev);
                sigma_prev.compose(sigma_q);

                codec::encode_perm(sigma_q, repr);
                let mut ok = commitment::verify_commitment(
                    k_q,
                    repr,
                    &commitments[(q + 1) * COMMITMENT_SIZE..(q + 2) * COMMITMENT_SIZE],
                );

                codec::encode_perm(&sigma_prev, repr);
                ok &= commitment::verify_commitment(
                    k_q_minus_1,
                    repr,
                    &commitments[q * COMMITMENT_SIZE..(q + 1) * COMMITMENT_SIZE],
                );
                ok
            }
        };

        if ok {
            self.successful_rounds += 1;
        }
        ok
    }

    /// Decodes a wire-format answer for the pending question and checks
    /// it; see [`Answer::from_bytes`] and [`Verifier::verify`].
    pub fn verify_encoded(&mut self, commitments: &[u8], answer: &[u8]) -> bool {
        let Some(q) = self.question else {
            return false;
        };
        match Answer::from_bytes(self.key.params, q, answer) {
            Ok(answer) => self.verify(commitments, &answer),
            Err(_) => {
                self.question = None;
                false
            }
        }
    }

    /// Number of rounds that have verified so far.
    pub fn successful_rounds(&self) -> u32 {
        self.successful_rounds
    }

    /// Upper bound on the probability that an impersonator without the
    /// private key passed every successful round: `(d/(d+1))^n`.
    pub fn impersonation_probability(&self) -> f64 {
        let d = self.key.params.d() as f64;
        (d / (d + 1.0)).powi(self.successful_rounds as i32)
    }
}

impl<'a> From<&'a PublicKey> for Verifier<'a, DefaultRng> {
    fn from(key: &'a PublicKey) -> Self {
        Verifier::new(key, DefaultRng::default())
    }
}
