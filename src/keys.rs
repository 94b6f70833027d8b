//! Private and public keys.
//!
//! The private key is a sequence of `d` indices into the preset's
//! generator table `F`; the public key is the inverse of the product of
//! the chosen generators. The index buffer is secret material and is
//! zeroed when the key is dropped.

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::errors::{ProtocolError, ProtocolResult};
use crate::params::Params;
use crate::permutation::Permutation;
use crate::sampler::rand_less_than;

/// A factorization witness: indices `i_1, …, i_d` into `F`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    params: &'static Params,
    indices: Vec<u32>,
}

impl PrivateKey {
    /// Samples a fresh private key for `params` from the CSPRNG.
    pub fn generate<R: RngCore + CryptoRng>(params: &'static Params, csrng: &mut R) -> Self {
        let indices = (0..params.d())
            .map(|_| rand_less_than(csrng, params.f.count()))
            .collect();
        Self { params, indices }
    }

    /// The preset this key belongs to.
    pub fn params(&self) -> &'static Params {
        self.params
    }

    pub(crate) fn index(&self, j: usize) -> u32 {
        self.indices[j]
    }

    /// Derives the public key `x0 = (F[i_d] ∘ … ∘ F[i_1])⁻¹`.
    ///
    /// The orientation (multiply, then invert once) is what the prover
    /// and verifier equations rely on.
    pub fn public_key(&self) -> PublicKey {
        let mut x0 = Permutation::identity(self.params.domain() as usize);
        for &i in &self.indices {
            x0.compose_indexed(&self.params.f, i);
        }
        x0.invert();
        PublicKey {
            params: self.params,
            x0,
        }
    }

    /// Whether `public` matches this private key: the product of the
    /// chosen generators applied after `x0` must be the identity.
    pub fn is_key_pair(&self, public: &PublicKey) -> bool {
        if !std::ptr::eq(self.params, public.params) {
            return false;
        }
        let mut t = public.x0.clone();
        for &i in &self.indices {
            t.compose_indexed(&self.params.f, i);
        }
        t.is_identity()
    }
}

/// A public key: the group element whose factorization the prover
/// demonstrates knowledge of.
#[derive(Clone, Debug)]
pub struct PublicKey {
    pub(crate) params: &'static Params,
    pub(crate) x0: Permutation,
}

impl PublicKey {
    /// Imports a public key from its wire representation, rejecting
    /// anything that is not a valid permutation of the preset's domain.
    pub fn import(params: &'static Params, bytes: &[u8]) -> ProtocolResult<Self> {
        let x0 = codec::decode_perm(params.domain(), bytes)
            .ok_or(ProtocolError::SerializationError)?;
        Ok(Self { params, x0 })
    }

    /// Exports the wire representation; [`Params::public_key_size`]
    /// bytes.
    pub fn export(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.params.public_key_size()];
        codec::encode_perm(&self.x0, &mut out);
        out
    }

    /// The preset this key belongs to.
    pub fn params(&self) -> &'static Params {
        self.params
    }
}
