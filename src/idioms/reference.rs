//! Idiom reference list loading
//!
//! The reference list is a tab-separated file with a header row. Column 0 of
//! each row holds the idiom string.

use csv::ReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{IdiomError, IdiomResult};

use super::filter::{is_target, FilterConfig};

const DELIM: u8 = b'\t';

/// Lazily yield the idiom column of every row after the header.
pub fn load_idioms(path: &Path) -> IdiomResult<impl Iterator<Item = IdiomResult<String>>> {
    let file = File::open(path).map_err(|err| IdiomError::Io {
        path: path.to_path_buf(),
        err,
    })?;
    let owned: PathBuf = path.to_path_buf();

    // the first row is consumed as the header
    let reader = ReaderBuilder::new()
        .delimiter(DELIM)
        .flexible(true)
        .from_reader(file);

    Ok(reader.into_records().filter_map(move |record| match record {
        Ok(record) => match record.get(0) {
            Some(idiom) if !idiom.is_empty() => Some(Ok(idiom.to_string())),
            _ => None,
        },
        Err(err) => Some(Err(IdiomError::Csv {
            path: owned.clone(),
            err,
        })),
    }))
}

/// `load_idioms`, keeping only the target idioms.
pub fn load_target_idioms<'a>(
    path: &Path,
    config: &'a FilterConfig,
) -> IdiomResult<impl Iterator<Item = IdiomResult<String>> + 'a> {
    Ok(load_idioms(path)?.filter(move |idiom| match idiom {
        Ok(idiom) => is_target(idiom, config),
        Err(_) => true,
    }))
}
