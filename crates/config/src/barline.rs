use serde::{Deserialize, Serialize};

/// Barline height, counted in interlines.
///
/// Most engravings use full-height barlines (four interlines on a
/// five-line staff), but percussion and educational material often use
/// short barlines, sometimes with a taller one at the start of each
/// system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BarlineHeight {
    /// Full-height barlines everywhere.
    #[default]
    Four,
    /// Short barlines, full-height at the start of a system.
    TwoThenFour,
    /// Short barlines everywhere.
    Two,
    /// One-interline barlines, two at the start of a system.
    OneThenTwo,
}

impl BarlineHeight {
    /// Interline count of a non-initial barline.
    pub fn standard_count(self) -> u32 {
        match self {
            Self::Four | Self::TwoThenFour => 4,
            Self::Two | Self::OneThenTwo => 2,
        }
    }

    /// Interline count of the barline starting a system.
    pub fn initial_count(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::TwoThenFour | Self::Two => 2,
            Self::OneThenTwo => 1,
        }
    }
}
