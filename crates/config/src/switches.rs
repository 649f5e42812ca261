use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use plica_param::{Param, Scope};

/// One named boolean processing toggle.
///
/// Declaration order is the registry order. The four groups (staff, item,
/// standard, retired) are contiguous runs over that order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ProcessingSwitch {
    // Staff switches
    OneLineStaves,
    FourStringTablatures,
    FiveLineStaves,
    DrumNotation,
    SixStringTablatures,

    // Item switches
    Articulations,
    ChordNames,
    CrossHeads,
    Fingerings,
    Frets,
    Lyrics,
    LyricsAboveStaff,
    MultiWholeHeadChords,
    PartialWholeRests,
    Pluckings,
    SmallHeads,
    Tremolos,

    // Standard switches
    ImplicitTuplets,
    KeepGrayImages,
    Indentations,
    BothSharedHeadDots,

    // Retired switches, kept so old project files still deserialize.
    // They have no backing default and are never evaluated.
    PoorInputMode,
    SmallBlackHeads,
    SmallVoidHeads,
    SmallWholeHeads,
}

/// The partition a switch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchGroup {
    /// Staff shapes and tablatures.
    Staff,
    /// Optional notation items.
    Item,
    /// Miscellaneous processing options.
    Standard,
    /// Kept for backward-compatible deserialization only.
    Retired,
}

impl ProcessingSwitch {
    /// The whole universe, in registry order.
    pub const ALL: [ProcessingSwitch; 25] = [
        Self::OneLineStaves,
        Self::FourStringTablatures,
        Self::FiveLineStaves,
        Self::DrumNotation,
        Self::SixStringTablatures,
        Self::Articulations,
        Self::ChordNames,
        Self::CrossHeads,
        Self::Fingerings,
        Self::Frets,
        Self::Lyrics,
        Self::LyricsAboveStaff,
        Self::MultiWholeHeadChords,
        Self::PartialWholeRests,
        Self::Pluckings,
        Self::SmallHeads,
        Self::Tremolos,
        Self::ImplicitTuplets,
        Self::KeepGrayImages,
        Self::Indentations,
        Self::BothSharedHeadDots,
        Self::PoorInputMode,
        Self::SmallBlackHeads,
        Self::SmallVoidHeads,
        Self::SmallWholeHeads,
    ];

    pub fn group(self) -> SwitchGroup {
        use ProcessingSwitch::*;
        match self {
            OneLineStaves | FourStringTablatures | FiveLineStaves | DrumNotation
            | SixStringTablatures => SwitchGroup::Staff,
            Articulations | ChordNames | CrossHeads | Fingerings | Frets | Lyrics
            | LyricsAboveStaff | MultiWholeHeadChords | PartialWholeRests | Pluckings
            | SmallHeads | Tremolos => SwitchGroup::Item,
            ImplicitTuplets | KeepGrayImages | Indentations | BothSharedHeadDots => {
                SwitchGroup::Standard
            }
            PoorInputMode | SmallBlackHeads | SmallVoidHeads | SmallWholeHeads => {
                SwitchGroup::Retired
            }
        }
    }

    /// Whether the switch is part of the supported universe.
    pub fn is_supported(self) -> bool {
        self.group() != SwitchGroup::Retired
    }

    /// Default value backing an active switch. Retired switches have
    /// none; check `is_supported` before relying on the result.
    pub fn default_value(self) -> Option<bool> {
        use ProcessingSwitch::*;
        match self {
            PoorInputMode | SmallBlackHeads | SmallVoidHeads | SmallWholeHeads => None,
            FiveLineStaves | Articulations | Lyrics | Indentations => Some(true),
            _ => Some(false),
        }
    }

    /// Persisted key for this switch.
    pub fn key(self) -> &'static str {
        use ProcessingSwitch::*;
        match self {
            OneLineStaves => "oneLineStaves",
            FourStringTablatures => "fourStringTablatures",
            FiveLineStaves => "fiveLineStaves",
            DrumNotation => "drumNotation",
            SixStringTablatures => "sixStringTablatures",
            Articulations => "articulations",
            ChordNames => "chordNames",
            CrossHeads => "crossHeads",
            Fingerings => "fingerings",
            Frets => "frets",
            Lyrics => "lyrics",
            LyricsAboveStaff => "lyricsAboveStaff",
            MultiWholeHeadChords => "multiWholeHeadChords",
            PartialWholeRests => "partialWholeRests",
            Pluckings => "pluckings",
            SmallHeads => "smallHeads",
            Tremolos => "tremolos",
            ImplicitTuplets => "implicitTuplets",
            KeepGrayImages => "keepGrayImages",
            Indentations => "indentations",
            BothSharedHeadDots => "bothSharedHeadDots",
            PoorInputMode => "poorInputMode",
            SmallBlackHeads => "smallBlackHeads",
            SmallVoidHeads => "smallVoidHeads",
            SmallWholeHeads => "smallWholeHeads",
        }
    }

    pub fn staff_switches() -> impl Iterator<Item = ProcessingSwitch> {
        Self::in_group(SwitchGroup::Staff)
    }

    pub fn item_switches() -> impl Iterator<Item = ProcessingSwitch> {
        Self::in_group(SwitchGroup::Item)
    }

    pub fn standard_switches() -> impl Iterator<Item = ProcessingSwitch> {
        Self::in_group(SwitchGroup::Standard)
    }

    pub fn retired_switches() -> impl Iterator<Item = ProcessingSwitch> {
        Self::in_group(SwitchGroup::Retired)
    }

    /// Every switch that is still evaluated, in registry order.
    pub fn supported_switches() -> impl Iterator<Item = ProcessingSwitch> {
        Self::ALL.iter().copied().filter(|switch| switch.is_supported())
    }

    fn in_group(group: SwitchGroup) -> impl Iterator<Item = ProcessingSwitch> {
        Self::ALL.iter().copied().filter(move |switch| switch.group() == group)
    }
}

impl fmt::Display for ProcessingSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The switch sub-aggregate: one boolean cell per supported switch.
///
/// Sparse by construction. A switch only has a cell once `complete` has
/// run or a persisted override installed one, and `prune` drops every
/// cell holding no override.
#[derive(Debug, Default)]
pub struct ProcessingSwitches {
    map: BTreeMap<ProcessingSwitch, Arc<Param<bool>>>,
}

impl ProcessingSwitches {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-default set: every supported switch seeded with its
    /// registry default.
    pub fn default_switches() -> Self {
        let mut switches = Self::new();
        for switch in ProcessingSwitch::supported_switches() {
            let cell = Param::new();
            cell.set_specific(switch.default_value());
            cell.set_scope(Scope::Default);
            switches.map.insert(switch, Arc::new(cell));
        }
        switches
    }

    /// The cell for a switch, if one exists at this scope.
    pub fn param(&self, switch: ProcessingSwitch) -> Option<&Arc<Param<bool>>> {
        self.map.get(&switch)
    }

    /// Effective value of a switch, `None` when nothing in the chain
    /// resolves it.
    pub fn value(&self, switch: ProcessingSwitch) -> Option<bool> {
        self.map.get(&switch).and_then(|cell| cell.effective())
    }

    /// Give every supported switch a cell. Idempotent.
    pub fn complete(&mut self) {
        for switch in ProcessingSwitch::supported_switches() {
            self.map.entry(switch).or_insert_with(|| Arc::new(Param::new()));
        }
    }

    /// Wire each cell to the same switch's cell one scope up.
    pub fn set_parents(&self, parent: &ProcessingSwitches) {
        for (switch, cell) in &self.map {
            if let Some(target) = parent.map.get(switch) {
                cell.set_parent(target);
            }
        }
    }

    pub fn set_scope(&self, scope: &Scope) {
        for cell in self.map.values() {
            cell.set_scope(scope.clone());
        }
    }

    /// Drop cells holding no override and report whether nothing remains.
    pub fn prune(&mut self) -> bool {
        self.map.retain(|_, cell| cell.is_specific());
        self.map.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether at least one switch carries an override at this scope.
    pub fn has_specific(&self) -> bool {
        self.map.values().any(|cell| cell.is_specific())
    }

    /// Fresh containers, same overrides, same parent targets.
    pub fn duplicate(&self) -> Self {
        Self {
            map: self
                .map
                .iter()
                .map(|(switch, cell)| (*switch, cell.duplicate()))
                .collect(),
        }
    }

    fn from_entries(entries: Vec<SwitchEntry>) -> Self {
        let mut switches = Self::new();
        for entry in entries {
            if !entry.key.is_supported() {
                debug!("ignoring retired switch {}", entry.key);
                continue;
            }
            let cell = Param::new();
            cell.set_specific(Some(entry.value));
            switches.map.insert(entry.key, Arc::new(cell));
        }
        switches
    }
}

/// Wire shape: `<switch key="lyrics">true</switch>` entries, overrides
/// only.
#[derive(Debug, Serialize, Deserialize)]
struct SwitchEntry {
    #[serde(rename = "@key")]
    key: ProcessingSwitch,
    #[serde(rename = "$text")]
    value: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SwitchesRepr {
    #[serde(rename = "switch", default)]
    entries: Vec<SwitchEntry>,
}

impl Serialize for ProcessingSwitches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self
            .map
            .iter()
            .filter_map(|(switch, cell)| {
                cell.specific().map(|value| SwitchEntry {
                    key: *switch,
                    value,
                })
            })
            .collect();
        SwitchesRepr { entries }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProcessingSwitches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = SwitchesRepr::deserialize(deserializer)?;
        Ok(Self::from_entries(repr.entries))
    }
}

/// Serde adapter for the aggregate's `processing` slot, mirroring the
/// cell codec: an all-inherit sub-aggregate is omitted entirely.
pub mod slot {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ProcessingSwitches;

    pub fn is_unset(slot: &Option<ProcessingSwitches>) -> bool {
        slot.as_ref().map_or(true, |switches| !switches.has_specific())
    }

    pub fn serialize<S: Serializer>(
        slot: &Option<ProcessingSwitches>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match slot {
            Some(switches) => switches.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ProcessingSwitches>, D::Error> {
        ProcessingSwitches::deserialize(deserializer).map(Some)
    }
}
