//! HMAC-SHA256 commitments.
//!
//! A commitment binds an encoded permutation under a fresh 32-byte key;
//! revealing the key opens it. Tag checks go through [`hmac::Mac`]'s
//! constant-time verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Size of a commitment tag and of a commitment key, in bytes.
pub(crate) const COMMITMENT_SIZE: usize = 32;

fn mac(key: &[u8], data: &[u8]) -> HmacSha256 {
    // HMAC takes keys of any size
    let mut mac = HmacSha256::new_from_slice(key).unwrap();
    mac.update(data);
    mac
}

/// Commitment tag for `data` under `key`.
pub(crate) fn commit(key: &[u8], data: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&mac(key, data).finalize().into_bytes());
}

/// Whether `expected` is the tag for `data` under `key`, compared in
/// constant time.
pub(crate) fn verify_commitment(key: &[u8], data: &[u8], expected: &[u8]) -> bool {
    mac(key, data).verify_slice(expected).is_ok()
}
