use std::fmt;

use serde::{Deserialize, Serialize};

/// Font family used for music symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MusicFamily {
    #[default]
    Bravura,
    Leland,
    FinaleJazz,
    JazzPerc,
}

impl MusicFamily {
    /// Name of the underlying font.
    pub fn font_name(self) -> &'static str {
        match self {
            Self::Bravura => "Bravura",
            Self::Leland => "Leland",
            Self::FinaleJazz => "Finale Jazz",
            Self::JazzPerc => "Jazz Perc",
        }
    }

    /// Family tried next when a glyph is missing from this one.
    pub fn backup(self) -> Option<MusicFamily> {
        match self {
            Self::Bravura => None,
            Self::Leland => Some(Self::Bravura),
            Self::FinaleJazz => Some(Self::JazzPerc),
            Self::JazzPerc => Some(Self::Bravura),
        }
    }
}

impl fmt::Display for MusicFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.font_name())
    }
}

/// Font family used for plain text items (titles, directions, lyrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextFamily {
    #[default]
    SansSerif,
    Serif,
    FinaleJazzText,
}

impl TextFamily {
    pub fn font_name(self) -> &'static str {
        match self {
            Self::SansSerif => "Sans Serif",
            Self::Serif => "Serif",
            Self::FinaleJazzText => "Finale Jazz Text",
        }
    }

    pub fn backup(self) -> Option<TextFamily> {
        match self {
            Self::SansSerif | Self::Serif => None,
            Self::FinaleJazzText => Some(Self::SansSerif),
        }
    }
}

impl fmt::Display for TextFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.font_name())
    }
}
