//! Dimensions, landmark kinds and the block classes the filters distinguish.

use std::fmt;

/// A simulated dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Overworld,
    Nether,
    End,
}

/// A procedurally placed point of interest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandmarkKind {
    Village,
    DesertPyramid,
    Monument,
    PillagerOutpost,
    BastionRemnant,
    Fortress,
    EndCity,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 7] = [
        LandmarkKind::Village,
        LandmarkKind::DesertPyramid,
        LandmarkKind::Monument,
        LandmarkKind::PillagerOutpost,
        LandmarkKind::BastionRemnant,
        LandmarkKind::Fortress,
        LandmarkKind::EndCity,
    ];

    /// The dimension this landmark generates in.
    pub const fn dimension(self) -> Dimension {
        match self {
            LandmarkKind::Village
            | LandmarkKind::DesertPyramid
            | LandmarkKind::Monument
            | LandmarkKind::PillagerOutpost => Dimension::Overworld,
            LandmarkKind::BastionRemnant | LandmarkKind::Fortress => Dimension::Nether,
            LandmarkKind::EndCity => Dimension::End,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LandmarkKind::Village => "village",
            LandmarkKind::DesertPyramid => "desert_pyramid",
            LandmarkKind::Monument => "monument",
            LandmarkKind::PillagerOutpost => "pillager_outpost",
            LandmarkKind::BastionRemnant => "bastion_remnant",
            LandmarkKind::Fortress => "fortress",
            LandmarkKind::EndCity => "end_city",
        }
    }
}

impl fmt::Display for LandmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Block classes relevant to floor and clearance tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Block {
    Air,
    /// Liquid obstacle; never counts as floor.
    Lava,
    /// Anything that can be stood on.
    Solid,
}

impl Block {
    pub const fn is_air(self) -> bool {
        matches!(self, Block::Air)
    }

    /// Solid ground: neither air nor lava.
    pub const fn is_floor(self) -> bool {
        matches!(self, Block::Solid)
    }
}
