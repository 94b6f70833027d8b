//! Byte-exact wire encodings.
//!
//! Permutations travel (and get committed) in a portable representation:
//! one byte per image for domains up to 255, little-endian base-255
//! pairs above that. Table indices (`tau`, `f`) travel little-endian in
//! the smallest width that fits the preset's tables.

use crate::permutation::{Permutation, PermutationArray};

const MAX_DOMAIN_SMALL_REPR: u32 = 255;

/// Size of the portable representation of a permutation on `domain`.
pub(crate) fn perm_repr_size(domain: u32) -> usize {
    (if domain > MAX_DOMAIN_SMALL_REPR { 2 } else { 1 }) * domain as usize
}

/// Encodes `perm` into `repr`, which must be exactly
/// [`perm_repr_size`] bytes.
pub(crate) fn encode_perm(perm: &Permutation, repr: &mut [u8]) {
    let domain = perm.domain() as u32;
    debug_assert_eq!(repr.len(), perm_repr_size(domain));
    for j in 0..domain as u16 {
        let value = perm.get(j + 1) as u32;
        if domain > MAX_DOMAIN_SMALL_REPR {
            repr[2 * j as usize] = (value % MAX_DOMAIN_SMALL_REPR) as u8;
            repr[2 * j as usize + 1] = (value / MAX_DOMAIN_SMALL_REPR) as u8;
        } else {
            repr[j as usize] = value as u8;
        }
    }
}

/// Encodes entry `j` of an interleaved table without materialising it.
pub(crate) fn encode_array_entry(a: &PermutationArray, j: u32, repr: &mut [u8]) {
    let domain = a.domain();
    debug_assert_eq!(repr.len(), perm_repr_size(domain));
    for i in 0..domain as u16 {
        let value = a.get(j, i + 1) as u32;
        if domain > MAX_DOMAIN_SMALL_REPR {
            repr[2 * i as usize] = (value % MAX_DOMAIN_SMALL_REPR) as u8;
            repr[2 * i as usize + 1] = (value / MAX_DOMAIN_SMALL_REPR) as u8;
        } else {
            repr[i as usize] = value as u8;
        }
    }
}

/// Decodes a portable representation, rejecting anything that is not a
/// valid permutation of `{1, …, domain}`.
pub(crate) fn decode_perm(domain: u32, repr: &[u8]) -> Option<Permutation> {
    if repr.len() != perm_repr_size(domain) {
        return None;
    }
    let mut mapping = Vec::with_capacity(domain as usize);
    for j in 0..domain as usize {
        let value = if domain > MAX_DOMAIN_SMALL_REPR {
            repr[2 * j] as u32 + repr[2 * j + 1] as u32 * MAX_DOMAIN_SMALL_REPR
        } else {
            repr[j] as u32
        };
        if value == 0 || value > domain {
            return None;
        }
        mapping.push(value as u16);
    }
    let perm = Permutation::from_mapping(mapping);
    perm.is_valid().then_some(perm)
}

/// Width in bytes of an encoded `tau` or `f` index.
///
/// Both tables must share the width, which holds for every preset:
/// either both counts fit one byte, or the counts are equal.
pub(crate) fn index_width(f_count: u32, h_count: u32) -> usize {
    assert!(
        (f_count <= 1 << 8 && h_count <= 1 << 8) || f_count == h_count,
        "F and H index widths diverge"
    );
    if f_count <= 1 << 8 {
        1
    } else if f_count <= 1 << 16 {
        2
    } else {
        3
    }
}

/// Little-endian index write; `out` is `index_width` bytes.
pub(crate) fn write_index(index: u32, out: &mut [u8]) {
    debug_assert!(out.len() <= 3);
    for (shift, byte) in out.iter_mut().enumerate() {
        *byte = (index >> (8 * shift)) as u8;
    }
}

/// Little-endian index read.
pub(crate) fn read_index(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 3);
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |acc, (shift, &byte)| acc | (byte as u32) << (8 * shift))
}
