//! Seed decomposition and the layer-seed arithmetic used by coarse biome tests.
//!
//! A 64-bit world seed splits into a 48-bit structure seed (low bits), which
//! alone decides landmark placement, and a 16-bit biome seed (high bits),
//! which only matters for biome assignment.

// ---------------------------------------------------------------------------
// Structure / biome split
// ---------------------------------------------------------------------------

/// Number of low bits that make up a structure seed.
pub const STRUCTURE_SEED_BITS: u32 = 48;

/// Mask selecting the structure seed bits of a world seed.
pub const STRUCTURE_SEED_MASK: u64 = (1 << STRUCTURE_SEED_BITS) - 1;

/// Number of distinct biome seeds sharing one structure seed.
pub const BIOME_SEED_COUNT: u32 = 1 << (64 - STRUCTURE_SEED_BITS);

/// The two independently varying halves of a world seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeedParts {
    /// Low 48 bits.
    pub structure_seed: u64,
    /// High 16 bits.
    pub biome_seed: u16,
}

/// Low 48 bits of `seed`.
#[inline]
pub fn structure_seed(seed: u64) -> u64 {
    seed & STRUCTURE_SEED_MASK
}

/// Split a world seed into its structure and biome halves.
#[inline]
pub fn decompose(seed: u64) -> SeedParts {
    SeedParts {
        structure_seed: structure_seed(seed),
        biome_seed: (seed >> STRUCTURE_SEED_BITS) as u16,
    }
}

/// Join a structure seed and a biome seed into a world seed.
///
/// Bits of `structure_seed` above bit 47 are discarded.
#[inline]
pub fn compose(structure_seed: u64, biome_seed: u16) -> u64 {
    (u64::from(biome_seed) << STRUCTURE_SEED_BITS) | (structure_seed & STRUCTURE_SEED_MASK)
}

/// Every world seed sharing `structure_seed`, in biome-seed order.
pub fn expansions(structure_seed: u64) -> impl Iterator<Item = u64> {
    (0..=u16::MAX).map(move |biome_seed| compose(structure_seed, biome_seed))
}

// ---------------------------------------------------------------------------
// Layer seed arithmetic
// ---------------------------------------------------------------------------

const MIX_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const MIX_INCREMENT: u64 = 1_442_695_040_888_963_407;

/// One step of the layer seed mixer: `seed * (seed * M + I) + salt` (wrapping).
#[inline]
pub fn mix_seed(seed: u64, salt: u64) -> u64 {
    seed.wrapping_mul(seed.wrapping_mul(MIX_MULTIPLIER).wrapping_add(MIX_INCREMENT))
        .wrapping_add(salt)
}

/// Derive the per-layer seed of a world for a layer salt.
pub fn layer_seed(world_seed: u64, salt: u64) -> u64 {
    let mut mid_salt = mix_seed(salt, salt);
    mid_salt = mix_seed(mid_salt, salt);
    mid_salt = mix_seed(mid_salt, salt);

    let mut seed = mix_seed(world_seed, mid_salt);
    seed = mix_seed(seed, mid_salt);
    mix_seed(seed, mid_salt)
}

/// Derive the seed of one layer cell from its layer seed.
pub fn local_seed(layer_seed: u64, x: i32, z: i32) -> u64 {
    let (x, z) = (i64::from(x) as u64, i64::from(z) as u64);
    let mut seed = mix_seed(layer_seed, x);
    seed = mix_seed(seed, z);
    seed = mix_seed(seed, x);
    mix_seed(seed, z)
}

/// The first bounded draw of a layer cell: `floor_mod(local_seed >> 24, bound)`
/// with an arithmetic shift.
#[inline]
pub fn first_int(local_seed: u64, bound: i64) -> i64 {
    ((local_seed as i64) >> 24).rem_euclid(bound)
}

/// Whether a layer cell's first draw out of `bound` is zero, i.e. the cell
/// passes a `1 in bound` chance.
#[inline]
pub fn one_in(layer_seed: u64, x: i32, z: i32, bound: i64) -> bool {
    first_int(local_seed(layer_seed, x, z), bound) == 0
}
