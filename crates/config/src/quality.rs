use serde::{Deserialize, Serialize};

/// Perceived quality of the input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputQuality {
    /// Computer-generated image, no scanning artifacts.
    Synthetic,
    /// Decent scan of a printed score.
    #[default]
    Standard,
    /// Low resolution, skew, bleed-through or handwriting.
    Poor,
}

impl InputQuality {
    /// Severity profile applied by the recognition heuristics for this
    /// quality of input.
    pub fn profile(self) -> i32 {
        match self {
            Self::Synthetic => profiles::STRICT,
            Self::Standard => profiles::STANDARD,
            Self::Poor => profiles::POOR,
        }
    }
}

/// Named severity levels used to relax recognition heuristics.
///
/// Some names deliberately share a value: a manual user action weighs
/// exactly as much as poor input quality, and rather-good head linking as
/// much as beam-seed linking. Consumers compare these numerically, so the
/// equalities are load-bearing; keep them when touching this table.
pub mod profiles {
    pub const STRICT: i32 = 0;
    pub const STANDARD: i32 = 1;
    pub const MANUAL: i32 = 2;
    pub const POOR: i32 = 2;
    pub const RATHER_GOOD_HEAD: i32 = 3;
    pub const BEAM_SEED: i32 = 3;

    /// Highest severity any profile can take.
    pub const MAX: i32 = 3;
}
