//! Symmetric-group presets.
//!
//! Here `H` is the cyclic group generated by a single permutation `h`
//! whose order equals the table size, and `F` consists of the conjugates
//! `H[j]⁻¹ ∘ f1 ∘ H[j]` of a single base generator. Conjugation closure
//! of `F` under `H` then holds by construction. The tables are large, so
//! they are materialised on first access and shared afterwards.

use once_cell::sync::OnceCell;

use super::{GPrime, Params};
use crate::permutation::{Permutation, PermutationArray};

struct Generators {
    h: &'static [u16],
    f1: &'static [u16],
}

fn build(
    domain: u32,
    order: u32,
    d: u32,
    name: &'static str,
    generators: &Generators,
) -> Params {
    log::debug!("materialising {name} parameter tables ({order} permutations per family)");

    let h_generator = Permutation::from_mapping(generators.h.to_vec());
    debug_assert!(h_generator.is_valid());

    let mut h_base = vec![0u16; order as usize * domain as usize];
    let mut acc = Permutation::identity(domain as usize);
    for exp in 0..order {
        PermutationArray::store_interleaved(&mut h_base, order, exp, &acc);
        acc.compose(&h_generator);
    }
    // the generator must have exactly the advertised order
    assert!(acc.is_identity(), "{name}: H generator order mismatch");
    let h = PermutationArray::owned(h_base, domain, order);

    let f1 = Permutation::from_mapping(generators.f1.to_vec());
    debug_assert!(f1.is_valid());

    let mut f_base = vec![0u16; order as usize * domain as usize];
    for exp in 0..order {
        acc.set_identity();
        acc.compose_indexed_inverse(&h, exp);
        acc.compose(&f1);
        acc.compose_indexed(&h, exp);
        PermutationArray::store_interleaved(&mut f_base, order, exp, &acc);
    }
    let f = PermutationArray::owned(f_base, domain, order);

    Params {
        domain,
        f,
        h,
        g_prime: GPrime::SymmetricGroup,
        d,
        name,
    }
}

const S41_GENERATORS: Generators = Generators {
    h: &[
        14, 2, 36, 23, 13, 7, 10, 24, 8, 6, 9, 40, 30, 39, 38, 25, 26, 37, 31, 34, 28, 29, 20,
        15, 17, 35, 11, 12, 22, 33, 18, 21, 5, 16, 3, 4, 1, 41, 19, 32, 27,
    ],
    f1: &[
        11, 20, 14, 28, 27, 17, 29, 23, 30, 40, 31, 4, 26, 5, 38, 37, 34, 1, 10, 41, 18, 12, 2,
        22, 24, 8, 32, 3, 36, 9, 6, 13, 33, 25, 21, 7, 39, 16, 35, 15, 19,
    ],
};

const S41_AST_GENERATORS: Generators = Generators {
    h: &[
        33, 16, 28, 39, 10, 34, 17, 11, 4, 13, 25, 32, 5, 7, 23, 14, 38, 35, 24, 21, 3, 18, 30,
        36, 22, 8, 40, 19, 31, 2, 37, 15, 26, 6, 41, 20, 1, 12, 27, 9, 29,
    ],
    f1: &[
        4, 8, 5, 36, 20, 39, 27, 28, 32, 15, 10, 25, 24, 1, 3, 13, 33, 30, 7, 34, 17, 21, 16,
        29, 41, 35, 2, 26, 22, 18, 14, 40, 38, 11, 9, 31, 23, 37, 19, 6, 12,
    ],
};

const S43_AST_GENERATORS: Generators = Generators {
    h: &[
        22, 26, 41, 32, 12, 30, 4, 42, 18, 13, 1, 25, 31, 11, 38, 9, 7, 40, 34, 2, 5, 24, 35,
        39, 20, 14, 23, 37, 28, 36, 33, 17, 8, 6, 27, 3, 15, 29, 21, 10, 19, 43, 16,
    ],
    f1: &[
        13, 23, 26, 1, 3, 11, 37, 18, 38, 43, 33, 35, 27, 41, 42, 25, 19, 16, 21, 22, 40, 14,
        28, 6, 15, 4, 24, 10, 12, 34, 39, 20, 5, 8, 17, 7, 36, 31, 9, 29, 32, 2, 30,
    ],
};

const S53_AST_GENERATORS: Generators = Generators {
    h: &[
        26, 4, 50, 14, 40, 42, 45, 28, 21, 11, 1, 3, 38, 51, 52, 31, 39, 27, 12, 48, 33, 5, 7,
        32, 19, 18, 35, 13, 24, 49, 41, 20, 34, 36, 6, 9, 17, 46, 8, 15, 2, 10, 47, 16, 53, 37,
        23, 43, 25, 30, 22, 44, 29,
    ],
    f1: &[
        52, 36, 1, 31, 8, 22, 3, 16, 27, 41, 26, 7, 34, 44, 48, 11, 19, 30, 24, 42, 49, 39, 17,
        40, 38, 37, 28, 23, 32, 51, 45, 10, 43, 33, 18, 6, 53, 5, 4, 12, 13, 46, 47, 29, 2, 15,
        14, 21, 20, 35, 50, 9, 25,
    ],
};

/// `S41`: the symmetric group on 41 points, `|F| = |H| = 9240`, `d = 12`.
pub fn s41() -> &'static Params {
    static PARAMS: OnceCell<Params> = OnceCell::new();
    PARAMS.get_or_init(|| build(41, 9240, 12, "S41", &S41_GENERATORS))
}

/// `S41*`: the symmetric group on 41 points, `|F| = |H| = 30030`, `d = 11`.
pub fn s41_star() -> &'static Params {
    static PARAMS: OnceCell<Params> = OnceCell::new();
    PARAMS.get_or_init(|| build(41, 30030, 11, "S41*", &S41_AST_GENERATORS))
}

/// `S43*`: the symmetric group on 43 points, `|F| = |H| = 60060`, `d = 10`.
pub fn s43_star() -> &'static Params {
    static PARAMS: OnceCell<Params> = OnceCell::new();
    PARAMS.get_or_init(|| build(43, 60060, 10, "S43*", &S43_AST_GENERATORS))
}

/// `S53*`: the symmetric group on 53 points, `|F| = |H| = 360360`, `d = 12`.
pub fn s53_star() -> &'static Params {
    static PARAMS: OnceCell<Params> = OnceCell::new();
    PARAMS.get_or_init(|| build(53, 360_360, 12, "S53*", &S53_AST_GENERATORS))
}
