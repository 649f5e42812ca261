use std::sync::Arc;

use plica_param::{Param, Scope};

use crate::barline::BarlineHeight;
use crate::filter::FilterDescriptor;
use crate::fonts::{MusicFamily, TextFamily};
use crate::quality::InputQuality;
use crate::switches::ProcessingSwitches;

/// Process-wide default cells, one per configurable dimension.
///
/// Built once at startup and handed to whatever constructs book-level
/// aggregates; read-mostly thereafter. Interline and beam sizes have no
/// meaningful process default, so their cells exist as wiring targets but
/// hold no value: a chain ending there resolves to `None`.
#[derive(Debug)]
pub struct GlobalDefaults {
    pub music_family: Arc<Param<MusicFamily>>,
    pub text_family: Arc<Param<TextFamily>>,
    pub input_quality: Arc<Param<InputQuality>>,
    pub binarization_filter: Arc<Param<FilterDescriptor>>,
    pub interline_specification: Arc<Param<u32>>,
    pub barline_height: Arc<Param<BarlineHeight>>,
    pub beam_specification: Arc<Param<u32>>,
    pub ocr_languages: Arc<Param<String>>,
    pub switches: ProcessingSwitches,
}

impl GlobalDefaults {
    /// OCR language specification applied when no scope overrides it.
    pub const OCR_LANGUAGES: &'static str = "eng";

    pub fn new() -> Self {
        let defaults = Self {
            music_family: Arc::new(Param::with_value(MusicFamily::default())),
            text_family: Arc::new(Param::with_value(TextFamily::default())),
            input_quality: Arc::new(Param::with_value(InputQuality::default())),
            binarization_filter: Arc::new(Param::with_value(FilterDescriptor::default())),
            interline_specification: Arc::new(Param::new()),
            barline_height: Arc::new(Param::with_value(BarlineHeight::default())),
            beam_specification: Arc::new(Param::new()),
            ocr_languages: Arc::new(Param::with_value(Self::OCR_LANGUAGES.to_string())),
            switches: ProcessingSwitches::default_switches(),
        };

        defaults.music_family.set_scope(Scope::Default);
        defaults.text_family.set_scope(Scope::Default);
        defaults.input_quality.set_scope(Scope::Default);
        defaults.binarization_filter.set_scope(Scope::Default);
        defaults.interline_specification.set_scope(Scope::Default);
        defaults.barline_height.set_scope(Scope::Default);
        defaults.beam_specification.set_scope(Scope::Default);
        defaults.ocr_languages.set_scope(Scope::Default);

        defaults
    }
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self::new()
    }
}
