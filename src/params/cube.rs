//! Rubik's-cube presets. The tables are fixed constants: `F` holds the
//! face moves, `H` the whole-cube rotations that permute the face moves
//! among themselves under conjugation.

use super::tables_3x3x3::{F_3X3X3, H_3X3X3};
use super::tables_5x5x5::{F_5X5X5, H_5X5X5};
use super::{GPrime, Params};
use crate::permutation::PermutationArray;

static PARAMS_3X3X3: Params = Params {
    domain: 48,
    f: PermutationArray::borrowed(&F_3X3X3, 48, 6),
    h: PermutationArray::borrowed(&H_3X3X3, 48, 24),
    g_prime: GPrime::MixingWalk,
    d: 24,
    name: "3x3x3 Rubik's Cube",
};

static PARAMS_5X5X5: Params = Params {
    domain: 288,
    f: PermutationArray::borrowed(&F_5X5X5, 288, 12),
    h: PermutationArray::borrowed(&H_5X5X5, 288, 48),
    g_prime: GPrime::MixingWalk,
    d: 42,
    name: "5x5x5 Rubik's Cube",
};

/// The 3×3×3 Rubik's cube: 48 facets, 6 face moves, 24 rotations.
pub fn cube_3x3x3() -> &'static Params {
    &PARAMS_3X3X3
}

/// The 5×5×5 Rubik's cube: 288 facets, 12 moves, 48 rotations.
pub fn cube_5x5x5() -> &'static Params {
    &PARAMS_5X5X5
}
