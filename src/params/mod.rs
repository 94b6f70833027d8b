//! Parameter presets.
//!
//! A preset bundles the domain size, the generator table `F`, the
//! blinding subgroup `H`, the group the random element `sigma_0` is
//! drawn from, and the secret length `d`. Presets are immutable and
//! shared; every [`crate::PrivateKey`], [`crate::Prover`] and
//! [`crate::Verifier`] holds a `&'static Params`.
//!
//! The structural invariant everything rests on: `H` is closed under
//! conjugating `F`, i.e. `H[tau]⁻¹ ∘ F[i] ∘ H[tau]` is again an entry of
//! `F` for every `tau` and `i`.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::codec;
use crate::commitment::COMMITMENT_SIZE;
use crate::permutation::{Permutation, PermutationArray};
use crate::sampler::rand_less_than;

mod cube;
mod symmetric;
mod tables_3x3x3;
mod tables_5x5x5;

pub use cube::{cube_3x3x3, cube_5x5x5};
pub use symmetric::{s41, s41_star, s43_star, s53_star};

/// How a preset draws the per-round random element `sigma_0`.
#[derive(Clone, Copy, Debug)]
pub(crate) enum GPrime {
    /// A `2d`-step random walk composing entries of `F` and `H`, with
    /// the step distribution weighted so both families are equally
    /// likely. Produces a well-mixed element of `⟨F ∪ H⟩`.
    MixingWalk,
    /// A Fisher-Yates shuffle: a uniform element of the full symmetric
    /// group on the domain.
    SymmetricGroup,
}

impl GPrime {
    pub(crate) fn sample_into<R: RngCore + CryptoRng>(
        self,
        params: &Params,
        csrng: &mut R,
        out: &mut Permutation,
    ) {
        out.set_identity();
        match self {
            GPrime::MixingWalk => {
                let steps = 2 * params.d;
                let f_factor = params.h.count() / params.f.count();
                for _ in 0..steps {
                    let j =
                        rand_less_than(csrng, params.h.count() + f_factor * params.f.count());
                    if j < params.h.count() {
                        out.compose_indexed(&params.h, j);
                    } else {
                        out.compose_indexed(&params.f, (j - params.h.count()) % params.f.count());
                    }
                }
            }
            GPrime::SymmetricGroup => {
                for i in 2..=out.domain() as u16 {
                    let j = 1 + rand_less_than(csrng, i as u32) as u16;
                    if j != i {
                        let t = out.get(i);
                        out.set(i, out.get(j));
                        out.set(j, t);
                    }
                }
            }
        }
    }
}

/// An immutable protocol parameter set.
pub struct Params {
    pub(crate) domain: u32,
    pub(crate) f: PermutationArray,
    pub(crate) h: PermutationArray,
    pub(crate) g_prime: GPrime,
    pub(crate) d: u32,
    pub(crate) name: &'static str,
}

impl Params {
    /// Size of the set the permutations act on.
    pub fn domain(&self) -> u32 {
        self.domain
    }

    /// Length of the private key, and single-round soundness parameter:
    /// an impersonator passes one round with probability `d/(d+1)`.
    pub fn d(&self) -> u32 {
        self.d
    }

    /// Human-readable preset name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size in bytes of an exported public key.
    pub fn public_key_size(&self) -> usize {
        codec::perm_repr_size(self.domain)
    }

    /// Size in bytes of the commitments block sent each round.
    pub fn commitments_size(&self) -> usize {
        (self.d as usize + 2) * COMMITMENT_SIZE
    }

    /// Size in bytes of an encoded answer to question `q`.
    pub fn answer_size(&self, q: u32) -> usize {
        let keys = if q == 0 { 3 } else { 2 };
        codec::index_width(self.f.count(), self.h.count())
            + codec::perm_repr_size(self.domain)
            + keys * COMMITMENT_SIZE
    }

    /// Size in bytes of the largest answer (the one for `q = 0`).
    pub fn max_answer_size(&self) -> usize {
        self.answer_size(0)
    }

    pub(crate) fn index_width(&self) -> usize {
        codec::index_width(self.f.count(), self.h.count())
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Params")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("alpha", &self.f.count())
            .field("h_order", &self.h.count())
            .field("d", &self.d)
            .finish()
    }
}
