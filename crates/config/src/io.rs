// Parameter persistence
// One XML file per owning entity, overrides only. An absent element, or
// an absent file, means "inherit everything".

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::params::Params;

#[derive(Debug)]
pub enum ParamsIoError {
    /// File read/write failure.
    Io(String),
    /// XML (de)serialization failure.
    Xml(String),
}

impl fmt::Display for ParamsIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Xml(msg) => write!(f, "XML error: {msg}"),
        }
    }
}

impl std::error::Error for ParamsIoError {}

/// Write an aggregate's overrides to `path`.
///
/// Pruning happens on a duplicate so the live aggregate keeps its cells
/// and wiring. When nothing survives the prune there is nothing worth
/// persisting: no file is written and any stale one is removed. Returns
/// whether a file was written.
pub fn save_params<S>(params: &Params<S>, path: &Path) -> Result<bool, ParamsIoError>
where
    Params<S>: Serialize,
{
    let mut copy = params.duplicate();
    if copy.prune() {
        if path.exists() {
            fs::remove_file(path).map_err(|e| ParamsIoError::Io(e.to_string()))?;
        }
        debug!("no overrides to persist at {}", path.display());
        return Ok(false);
    }

    let xml = quick_xml::se::to_string_with_root("parameters", &copy)
        .map_err(|e| ParamsIoError::Xml(e.to_string()))?;
    fs::write(path, xml).map_err(|e| ParamsIoError::Io(e.to_string()))?;
    Ok(true)
}

/// Read an aggregate back from `path`.
///
/// The result is sparse: cells exist only where the file holds overrides,
/// and no cell has a parent. The caller completes the aggregate and
/// re-wires it into its scope chain.
pub fn load_params<S>(path: &Path) -> Result<Params<S>, ParamsIoError>
where
    Params<S>: DeserializeOwned,
{
    let xml = fs::read_to_string(path).map_err(|e| ParamsIoError::Io(e.to_string()))?;
    quick_xml::de::from_str(&xml).map_err(|e| ParamsIoError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::MusicFamily;
    use crate::params::BookParams;

    #[test]
    fn save_skips_empty_aggregate_and_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-params.xml");
        fs::write(&path, "stale").unwrap();

        let mut params = BookParams::new();
        params.complete_params();

        let written = save_params(&params, &path).unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book-params.xml");

        let mut params = BookParams::new();
        params.complete_params();
        params
            .music_family
            .as_ref()
            .expect("complete")
            .set_specific(Some(MusicFamily::Leland));
        params
            .interline_specification
            .as_ref()
            .expect("complete")
            .set_specific(Some(18));

        assert!(save_params(&params, &path).unwrap());

        // Saving never disturbs the live aggregate.
        assert!(params.ocr_languages.is_some());

        let loaded: BookParams = load_params(&path).unwrap();
        assert_eq!(
            loaded.music_family.as_ref().and_then(|c| c.specific()),
            Some(MusicFamily::Leland)
        );
        assert_eq!(
            loaded.interline_specification.as_ref().and_then(|c| c.specific()),
            Some(18)
        );
        assert!(loaded.ocr_languages.is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<BookParams, _> = load_params(&dir.path().join("absent.xml"));
        assert!(matches!(result, Err(ParamsIoError::Io(_))));
    }

    #[test]
    fn load_reports_malformed_xml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xml");
        fs::write(&path, "<parameters><interline>not-a-number</interline></parameters>").unwrap();

        let result: Result<BookParams, _> = load_params(&path);
        assert!(matches!(result, Err(ParamsIoError::Xml(_))));
    }
}
