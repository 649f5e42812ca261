use plica_config::barline::BarlineHeight;
use plica_config::fonts::MusicFamily;
use plica_config::io::{load_params, save_params};
use plica_config::quality::InputQuality;
use plica_config::{BookParams, GlobalDefaults, ProcessingSwitch, SheetParams};
use plica_param::Scope;

/// A fully wired default -> book -> sheet chain, the way an owning book
/// sets one up: complete both aggregates, wire the book to the process
/// defaults and the sheet to the book.
fn wired_chain() -> (GlobalDefaults, BookParams, SheetParams) {
    let defaults = GlobalDefaults::new();

    let mut book = BookParams::new();
    book.complete_params();
    book.set_scope(&Scope::Book("opus".into()));
    book.set_parents(&defaults);

    let mut sheet = SheetParams::new();
    sheet.complete_params();
    sheet.set_scope(&Scope::Sheet("opus#1".into()));
    sheet.set_parents(&book);

    (defaults, book, sheet)
}

// -------------------------------------------------------------------------
// Three-level resolution
// -------------------------------------------------------------------------

#[test]
fn sheet_inherits_process_default_when_nothing_is_set() {
    let (_defaults, _book, sheet) = wired_chain();

    let cell = sheet.music_family.as_ref().expect("complete");
    assert_eq!(cell.effective(), Some(MusicFamily::Bravura));
    assert!(!cell.is_specific());
}

#[test]
fn book_override_shadows_process_default_for_its_sheets() {
    let (_defaults, book, sheet) = wired_chain();

    book.input_quality
        .as_ref()
        .expect("complete")
        .set_specific(Some(InputQuality::Poor));

    let cell = sheet.input_quality.as_ref().expect("complete");
    assert_eq!(cell.effective(), Some(InputQuality::Poor));
    // The sheet itself still has no override.
    assert!(!cell.is_specific());
}

#[test]
fn sheet_override_wins_over_book_and_default() {
    let (_defaults, book, sheet) = wired_chain();

    book.barline_height
        .as_ref()
        .expect("complete")
        .set_specific(Some(BarlineHeight::Two));
    sheet
        .barline_height
        .as_ref()
        .expect("complete")
        .set_specific(Some(BarlineHeight::OneThenTwo));

    let cell = sheet.barline_height.as_ref().expect("complete");
    assert_eq!(cell.effective(), Some(BarlineHeight::OneThenTwo));

    // Clearing the sheet override falls back to the book value.
    cell.set_specific(None);
    assert_eq!(cell.effective(), Some(BarlineHeight::Two));
}

#[test]
fn sizes_resolve_to_none_through_a_fully_wired_chain() {
    let (_defaults, _book, sheet) = wired_chain();

    // No scope specifies an interline: absence is the legitimate answer.
    let cell = sheet.interline_specification.as_ref().expect("complete");
    assert_eq!(cell.effective(), None);
}

#[test]
fn unwired_aggregate_resolves_to_absent_not_error() {
    let mut sheet = SheetParams::new();
    sheet.complete_params();

    let cell = sheet.ocr_languages.as_ref().expect("complete");
    assert_eq!(cell.effective(), None);
}

#[test]
fn switch_overrides_flow_down_the_chain() {
    let (_defaults, book, sheet) = wired_chain();

    let switches = sheet.switches.as_ref().expect("complete");
    // Registry default reaches the sheet.
    assert_eq!(switches.value(ProcessingSwitch::Lyrics), Some(true));

    book.switches
        .as_ref()
        .expect("complete")
        .param(ProcessingSwitch::Lyrics)
        .expect("complete")
        .set_specific(Some(false));
    assert_eq!(switches.value(ProcessingSwitch::Lyrics), Some(false));

    switches
        .param(ProcessingSwitch::Lyrics)
        .expect("complete")
        .set_specific(Some(true));
    assert_eq!(switches.value(ProcessingSwitch::Lyrics), Some(true));
}

// -------------------------------------------------------------------------
// Staging via duplicate
// -------------------------------------------------------------------------

#[test]
fn edits_staged_on_a_duplicate_never_leak_into_the_committed_chain() {
    let (_defaults, book, sheet) = wired_chain();

    let staged = book.duplicate();
    staged
        .input_quality
        .as_ref()
        .expect("complete")
        .set_specific(Some(InputQuality::Synthetic));

    // The sheet reads through the committed book, not the staged copy.
    let cell = sheet.input_quality.as_ref().expect("complete");
    assert_eq!(cell.effective(), Some(InputQuality::Standard));

    // Commit = rewire the sheet onto the staged copy.
    sheet.set_parents(&staged);
    assert_eq!(cell.effective(), Some(InputQuality::Synthetic));
}

// -------------------------------------------------------------------------
// Persistence round trips
// -------------------------------------------------------------------------

#[test]
fn xml_round_trip_restores_the_chain_after_rewiring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xml");

    let (defaults, book, _sheet) = wired_chain();
    book.music_family
        .as_ref()
        .expect("complete")
        .set_specific(Some(MusicFamily::FinaleJazz));
    book.switches
        .as_ref()
        .expect("complete")
        .param(ProcessingSwitch::DrumNotation)
        .expect("complete")
        .set_specific(Some(true));

    assert!(save_params(&book, &path).unwrap());

    let mut loaded: BookParams = load_params(&path).unwrap();
    // Only overrides came back.
    assert!(loaded.text_family.is_none());
    assert!(loaded.barline_height.is_none());

    loaded.complete_params();
    loaded.set_parents(&defaults);

    let music = loaded.music_family.as_ref().expect("complete");
    assert_eq!(music.effective(), Some(MusicFamily::FinaleJazz));

    let text = loaded.text_family.as_ref().expect("complete");
    assert_eq!(text.effective(), defaults.text_family.effective());

    let switches = loaded.switches.as_ref().expect("complete");
    assert_eq!(switches.value(ProcessingSwitch::DrumNotation), Some(true));
    assert_eq!(switches.value(ProcessingSwitch::Lyrics), Some(true));
}

#[test]
fn persisted_form_omits_inherited_dimensions() {
    let (_defaults, book, _sheet) = wired_chain();
    book.ocr_languages
        .as_ref()
        .expect("complete")
        .set_specific(Some("deu+eng".to_string()));

    let mut copy = book.duplicate();
    assert!(!copy.prune());
    let xml = quick_xml::se::to_string_with_root("parameters", &copy).unwrap();

    assert!(xml.contains("ocr-languages"));
    assert!(xml.contains("deu+eng"));
    assert!(!xml.contains("music-font"));
    assert!(!xml.contains("interline"));
    assert!(!xml.contains("processing"));
}

#[test]
fn old_file_with_retired_switch_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old-book.xml");
    std::fs::write(
        &path,
        "<parameters>\
            <input-quality>Poor</input-quality>\
            <processing>\
                <switch key=\"poorInputMode\">true</switch>\
                <switch key=\"indentations\">false</switch>\
            </processing>\
        </parameters>",
    )
    .unwrap();

    let loaded: BookParams = load_params(&path).unwrap();
    assert_eq!(
        loaded.input_quality.as_ref().and_then(|c| c.specific()),
        Some(InputQuality::Poor)
    );

    let switches = loaded.switches.as_ref().expect("present");
    assert!(switches.param(ProcessingSwitch::PoorInputMode).is_none());
    assert_eq!(switches.value(ProcessingSwitch::Indentations), Some(false));
}
