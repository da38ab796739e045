//! Biome identifiers and coarse biome-layer handles.
//!
//! Numeric ids follow the conventional legacy biome registry so seed lists
//! and layer values can be cross-checked against other tools.

/// Numeric biome identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

impl BiomeId {
    pub const OCEAN: Self = Self(0);
    pub const PLAINS: Self = Self(1);
    pub const DESERT: Self = Self(2);
    pub const MOUNTAINS: Self = Self(3);
    pub const FOREST: Self = Self(4);
    pub const TAIGA: Self = Self(5);
    pub const SWAMP: Self = Self(6);
    pub const RIVER: Self = Self(7);
    pub const NETHER_WASTES: Self = Self(8);
    pub const THE_END: Self = Self(9);
    pub const SNOWY_TUNDRA: Self = Self(12);
    pub const MUSHROOM_FIELDS: Self = Self(14);
    pub const MUSHROOM_FIELD_SHORE: Self = Self(15);
    pub const DESERT_HILLS: Self = Self(17);
    pub const JUNGLE: Self = Self(21);
    pub const DEEP_OCEAN: Self = Self(24);
    pub const SNOWY_TAIGA: Self = Self(30);
    pub const SNOWY_TAIGA_HILLS: Self = Self(31);
    pub const GIANT_TREE_TAIGA: Self = Self(32);
    pub const GIANT_TREE_TAIGA_HILLS: Self = Self(33);
    pub const SAVANNA: Self = Self(35);
    pub const WOODED_BADLANDS_PLATEAU: Self = Self(38);
    pub const BADLANDS_PLATEAU: Self = Self(39);
    pub const SMALL_END_ISLANDS: Self = Self(40);
    pub const END_MIDLANDS: Self = Self(41);
    pub const END_HIGHLANDS: Self = Self(42);
    pub const END_BARRENS: Self = Self(43);
    pub const DEEP_WARM_OCEAN: Self = Self(47);
    pub const DEEP_LUKEWARM_OCEAN: Self = Self(48);
    pub const DEEP_COLD_OCEAN: Self = Self(49);
    pub const DEEP_FROZEN_OCEAN: Self = Self(50);
    pub const BAMBOO_JUNGLE: Self = Self(168);
    pub const BAMBOO_JUNGLE_HILLS: Self = Self(169);
    pub const SOUL_SAND_VALLEY: Self = Self(170);
    pub const CRIMSON_FOREST: Self = Self(171);
    pub const WARPED_FOREST: Self = Self(172);
    pub const BASALT_DELTAS: Self = Self(173);

    /// Layer value as a biome id. Negative values map to ocean.
    pub fn from_layer_value(value: i32) -> Self {
        Self(u16::try_from(value).unwrap_or(0))
    }

    /// The id as a layer value.
    pub const fn layer_value(self) -> i32 {
        self.0 as i32
    }
}

/// A stage of the coarse biome layer stack, sampled on its own grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeLayer(pub u8);

impl BiomeLayer {
    /// 1:1024. Non-zero where the special-biome roll succeeded.
    pub const SPECIAL: Self = Self(9);
    /// 1:1024. Macro category of special and climate tiles (see the `CATEGORY_*` values).
    pub const CATEGORY: Self = Self(11);
    /// 1:256. Biome ids after mushroom islands are placed.
    pub const MUSHROOM: Self = Self(16);
    /// 1:256. Full biome ids.
    pub const BIOMES: Self = Self(19);
    /// 1:64. Biome ids after hills variants.
    pub const HILLS: Self = Self(26);
    /// 1:16. Biome ids after shores.
    pub const SHORE: Self = Self(31);

    pub const CATEGORY_BADLANDS: i32 = 1;
    pub const CATEGORY_JUNGLE: i32 = 2;
    pub const CATEGORY_GIANT_TAIGA: i32 = 3;
    pub const CATEGORY_FREEZING: i32 = 4;

    /// Blocks per cell on this layer.
    pub const fn scale(self) -> i32 {
        match self.0 {
            0..=13 => 1024,
            14..=19 => 256,
            20..=26 => 64,
            _ => 16,
        }
    }
}

/// Layer salts and chances of the arithmetic-only coarse tests.
pub mod salts {
    /// Salt of the layer that marks special 1:1024 tiles.
    pub const SPECIAL: u64 = 3;
    /// A 1:1024 tile is special with chance 1 in this.
    pub const SPECIAL_CHANCE: i64 = 13;
    /// Salt of the layer that places mushroom islands on 1:256 tiles.
    pub const MUSHROOM: u64 = 5;
    /// A 1:256 tile is a mushroom candidate with chance 1 in this.
    pub const MUSHROOM_CHANCE: i64 = 100;
}
