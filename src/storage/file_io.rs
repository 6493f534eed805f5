//! JSON files for the catalog and ledger state
//!
//! Reads report `Io` for an unreadable file and `Parse` for malformed content,
//! the same kinds the apprc loader uses. State is written to a sibling temp
//! file and renamed over the target.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{MarketError, MarketResult};

/// Read `path`, or `T::default()` when it does not exist yet
pub fn read_json<T, P>(path: P) -> MarketResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => parse(path, file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No file yet, using defaults");
            Ok(T::default())
        }
        Err(e) => Err(MarketError::io_at(path, e)),
    }
}

/// Read `path`, which must exist
pub fn read_json_required<T, P>(path: P) -> MarketResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MarketError::io_at(path, e))?;
    parse(path, file)
}

fn parse<T: DeserializeOwned>(path: &Path, file: File) -> MarketResult<T> {
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            MarketError::io_at(path, e)
        } else {
            MarketError::parse_at(path, e)
        }
    })
}

/// Write `data` as pretty JSON, replacing `path` only once the write succeeded
pub fn write_json_atomic<T, P>(path: P, data: &T) -> MarketResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MarketError::io_at(parent, e))?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let written = write_to(&temp_path, data)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| MarketError::io_at(path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

fn write_to<T: Serialize>(path: &Path, data: &T) -> MarketResult<()> {
    let file = File::create(path).map_err(|e| MarketError::io_at(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| MarketError::io_at(path, e))?;
    writer.flush().map_err(|e| MarketError::io_at(path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| MarketError::io_at(path, e))
}
