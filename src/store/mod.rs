//! On-disk layout and CSV helpers for the files the stages hand to each other.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::NepseError;

pub const NEWS_SUFFIX: &str = "_news.csv";
pub const SENTIMENT_SUFFIX: &str = "_share_sentiment.csv";

/// Where every stage reads and writes, relative to one root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new("output")
    }
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn news_dir(&self) -> PathBuf {
        self.root.join("news_data")
    }

    pub fn sentiment_dir(&self) -> PathBuf {
        self.root.join("sentiment_results")
    }

    pub fn news_file(&self, symbol: &str) -> PathBuf {
        self.news_dir().join(format!("{symbol}{NEWS_SUFFIX}"))
    }

    pub fn sentiment_file(&self, symbol: &str) -> PathBuf {
        self.sentiment_dir().join(format!("{symbol}{SENTIMENT_SUFFIX}"))
    }

    pub fn credibility_file(&self) -> PathBuf {
        self.root.join("weightage").join("media_weightage.json")
    }

    pub fn impact_file(&self) -> PathBuf {
        self.root.join("share_weightage.csv")
    }

    pub fn historical_predictions_file(&self) -> PathBuf {
        self.root
            .join("history_prediction")
            .join("history_price_prediction.csv")
    }

    pub fn final_predictions_file(&self) -> PathBuf {
        self.root
            .join("final_prediction")
            .join("share_prediction.csv")
    }
}

fn ensure_parent(path: &Path) -> Result<(), NepseError> {
    if let Some(p) = path.parent()
        && !p.as_os_str().is_empty()
    {
        fs::create_dir_all(p)?;
    }
    Ok(())
}

/// Appends `rows`; the header is written only when the file is new or empty.
///
/// # Errors
///
/// Propagates filesystem and CSV encoding failures.
pub fn append_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, NepseError> {
    if rows.is_empty() {
        return Ok(0);
    }
    ensure_parent(path)?;
    let fresh = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new().has_headers(fresh).from_writer(file);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

/// Replaces the file with a header plus `rows`.
///
/// # Errors
///
/// Propagates filesystem and CSV encoding failures.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize, NepseError> {
    ensure_parent(path)?;
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

fn reader(path: &Path) -> Result<csv::Reader<std::io::Cursor<Vec<u8>>>, NepseError> {
    let mut bytes = fs::read(path)?;
    // Files written by spreadsheet tools often start with a UTF-8 BOM.
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(..3);
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(std::io::Cursor::new(bytes)))
}

/// Reads every row; the first bad row fails the whole file.
///
/// # Errors
///
/// `NepseError::Io` for an unreadable file, `NepseError::Csv` for a missing
/// column or a malformed row.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, NepseError> {
    let mut rdr = reader(path)?;
    let mut out = Vec::new();
    for rec in rdr.deserialize::<T>() {
        out.push(rec?);
    }
    Ok(out)
}

/// Reads every row, skipping (and logging) rows that do not decode.
///
/// # Errors
///
/// Only fails if the file cannot be read at all.
pub fn read_rows_lenient<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, NepseError> {
    let mut rdr = reader(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.deserialize::<T>().enumerate() {
        match rec {
            Ok(row) => out.push(row),
            Err(e) => tracing::warn!(path = %path.display(), row = line + 1, error = %e, "skipping bad row"),
        }
    }
    Ok(out)
}

/// `(symbol, path)` for every file in `dir` named `<symbol><suffix>`, sorted by symbol.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Propagates directory read failures other than "not found".
pub fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>, NepseError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut out = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(symbol) = name.strip_suffix(suffix)
            && !symbol.is_empty()
        {
            out.push((symbol.to_string(), path.clone()));
        }
    }
    out.sort();
    Ok(out)
}
