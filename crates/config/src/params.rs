use std::marker::PhantomData;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use plica_param::{codec, Param, Scope};

use crate::barline::BarlineHeight;
use crate::defaults::GlobalDefaults;
use crate::filter::FilterDescriptor;
use crate::fonts::{MusicFamily, TextFamily};
use crate::quality::InputQuality;
use crate::switches::{slot as switches_slot, ProcessingSwitches};

/// Marker for a book-level aggregate, inheriting from process defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookScope;

/// Marker for a sheet-level aggregate, inheriting from its book.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetScope;

pub type BookParams = Params<BookScope>;
pub type SheetParams = Params<SheetScope>;

/// The parameter bundle of one owning entity: nine slots, one per
/// configurable dimension.
///
/// A slot is `None` until `complete_params` fills it with an unbound
/// cell, and goes back to `None` when `prune` finds no override in it.
/// Only overrides are ever persisted; everything else is recovered from
/// the parent chain after `set_parents`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Params<S> {
    #[serde(rename = "music-font", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub music_family: Option<Arc<Param<MusicFamily>>>,

    #[serde(rename = "text-font", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub text_family: Option<Arc<Param<TextFamily>>>,

    #[serde(rename = "input-quality", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub input_quality: Option<Arc<Param<InputQuality>>>,

    #[serde(rename = "binarization", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub binarization_filter: Option<Arc<Param<FilterDescriptor>>>,

    #[serde(rename = "interline", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub interline_specification: Option<Arc<Param<u32>>>,

    #[serde(rename = "barline-height", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub barline_height: Option<Arc<Param<BarlineHeight>>>,

    #[serde(rename = "beam-thickness", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub beam_specification: Option<Arc<Param<u32>>>,

    #[serde(rename = "ocr-languages", skip_serializing_if = "codec::is_unset", with = "codec")]
    pub ocr_languages: Option<Arc<Param<String>>>,

    #[serde(rename = "processing", skip_serializing_if = "switches_slot::is_unset", with = "switches_slot")]
    pub switches: Option<ProcessingSwitches>,

    #[serde(skip)]
    level: PhantomData<S>,
}

impl<S> Default for Params<S> {
    fn default() -> Self {
        Self {
            music_family: None,
            text_family: None,
            input_quality: None,
            binarization_filter: None,
            interline_specification: None,
            barline_height: None,
            beam_specification: None,
            ocr_languages: None,
            switches: None,
            level: PhantomData,
        }
    }
}

impl<S> Params<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every absent slot with a fresh unbound cell. Idempotent:
    /// slots that already hold a cell, typically installed from persisted
    /// overrides, are left alone.
    pub fn complete_params(&mut self) {
        complete_slot(&mut self.music_family);
        complete_slot(&mut self.text_family);
        complete_slot(&mut self.input_quality);
        complete_slot(&mut self.binarization_filter);
        complete_slot(&mut self.interline_specification);
        complete_slot(&mut self.barline_height);
        complete_slot(&mut self.beam_specification);
        complete_slot(&mut self.ocr_languages);
        self.switches.get_or_insert_with(ProcessingSwitches::new).complete();
    }

    /// Drop every slot holding no override, so the persisted form stays
    /// minimal. The two size slots also treat an explicit 0 as "no
    /// override": zero is not a valid physical size, it is the unset
    /// sentinel. Returns whether the whole aggregate is now empty.
    pub fn prune(&mut self) -> bool {
        prune_slot(&mut self.music_family);
        prune_slot(&mut self.text_family);
        prune_slot(&mut self.input_quality);
        prune_slot(&mut self.binarization_filter);
        prune_size_slot(&mut self.interline_specification);
        prune_slot(&mut self.barline_height);
        prune_size_slot(&mut self.beam_specification);
        prune_slot(&mut self.ocr_languages);
        if self.switches.as_mut().is_some_and(|switches| switches.prune()) {
            self.switches = None;
        }

        let empty = self.is_empty();
        if empty {
            debug!("parameters pruned to empty");
        }
        empty
    }

    /// Whether every slot is absent. Meaningful after `prune`; before
    /// `complete_params` a fresh aggregate is trivially empty.
    pub fn is_empty(&self) -> bool {
        self.music_family.is_none()
            && self.text_family.is_none()
            && self.input_quality.is_none()
            && self.binarization_filter.is_none()
            && self.interline_specification.is_none()
            && self.barline_height.is_none()
            && self.beam_specification.is_none()
            && self.ocr_languages.is_none()
            && self.switches.is_none()
    }

    /// Tag every cell with the owning entity's identity, for log context
    /// only.
    pub fn set_scope(&self, scope: &Scope) {
        scope_slot(&self.music_family, scope);
        scope_slot(&self.text_family, scope);
        scope_slot(&self.input_quality, scope);
        scope_slot(&self.binarization_filter, scope);
        scope_slot(&self.interline_specification, scope);
        scope_slot(&self.barline_height, scope);
        scope_slot(&self.beam_specification, scope);
        scope_slot(&self.ocr_languages, scope);
        if let Some(switches) = &self.switches {
            switches.set_scope(scope);
        }
    }

    /// Shallow copy: fresh containers holding the same overrides and the
    /// same parent targets. Edits staged on the copy never show through
    /// the original, which is how a dialog stages changes before commit.
    pub fn duplicate(&self) -> Self {
        Self {
            music_family: duplicate_slot(&self.music_family),
            text_family: duplicate_slot(&self.text_family),
            input_quality: duplicate_slot(&self.input_quality),
            binarization_filter: duplicate_slot(&self.binarization_filter),
            interline_specification: duplicate_slot(&self.interline_specification),
            barline_height: duplicate_slot(&self.barline_height),
            beam_specification: duplicate_slot(&self.beam_specification),
            ocr_languages: duplicate_slot(&self.ocr_languages),
            switches: self.switches.as_ref().map(ProcessingSwitches::duplicate),
            level: PhantomData,
        }
    }
}

impl Params<BookScope> {
    /// Wire every cell to the process-wide default of its dimension.
    ///
    /// Call once the aggregate is complete and the defaults are known;
    /// calling again simply rebinds.
    pub fn set_parents(&self, defaults: &GlobalDefaults) {
        wire(&self.music_family, &defaults.music_family);
        wire(&self.text_family, &defaults.text_family);
        wire(&self.input_quality, &defaults.input_quality);
        wire(&self.binarization_filter, &defaults.binarization_filter);
        wire(&self.interline_specification, &defaults.interline_specification);
        wire(&self.barline_height, &defaults.barline_height);
        wire(&self.beam_specification, &defaults.beam_specification);
        wire(&self.ocr_languages, &defaults.ocr_languages);
        if let Some(switches) = &self.switches {
            switches.set_parents(&defaults.switches);
        }
    }
}

impl Params<SheetScope> {
    /// Wire each cell to the corresponding cell of the owning book.
    ///
    /// The book aggregate is expected to be complete; a slot the book
    /// lacks leaves the sheet cell unbound.
    pub fn set_parents(&self, book: &BookParams) {
        wire_to_slot(&self.music_family, &book.music_family);
        wire_to_slot(&self.text_family, &book.text_family);
        wire_to_slot(&self.input_quality, &book.input_quality);
        wire_to_slot(&self.binarization_filter, &book.binarization_filter);
        wire_to_slot(&self.interline_specification, &book.interline_specification);
        wire_to_slot(&self.barline_height, &book.barline_height);
        wire_to_slot(&self.beam_specification, &book.beam_specification);
        wire_to_slot(&self.ocr_languages, &book.ocr_languages);
        if let (Some(own), Some(parent)) = (&self.switches, &book.switches) {
            own.set_parents(parent);
        }
    }
}

fn complete_slot<T>(slot: &mut Option<Arc<Param<T>>>) {
    if slot.is_none() {
        *slot = Some(Arc::new(Param::new()));
    }
}

fn prune_slot<T>(slot: &mut Option<Arc<Param<T>>>) {
    if slot.as_ref().is_some_and(|cell| !cell.is_specific()) {
        *slot = None;
    }
}

fn prune_size_slot(slot: &mut Option<Arc<Param<u32>>>) {
    if slot
        .as_ref()
        .is_some_and(|cell| matches!(cell.specific(), None | Some(0)))
    {
        *slot = None;
    }
}

fn scope_slot<T>(slot: &Option<Arc<Param<T>>>, scope: &Scope) {
    if let Some(cell) = slot {
        cell.set_scope(scope.clone());
    }
}

fn duplicate_slot<T: Clone>(slot: &Option<Arc<Param<T>>>) -> Option<Arc<Param<T>>> {
    slot.as_ref().map(|cell| cell.duplicate())
}

fn wire<T>(slot: &Option<Arc<Param<T>>>, target: &Arc<Param<T>>) {
    if let Some(cell) = slot {
        cell.set_parent(target);
    }
}

fn wire_to_slot<T>(slot: &Option<Arc<Param<T>>>, target: &Option<Arc<Param<T>>>) {
    if let (Some(cell), Some(target)) = (slot, target) {
        cell.set_parent(target);
    }
}
