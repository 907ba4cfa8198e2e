// src/storage/mod.rs
use crate::edgar::models::FilingRow;
use crate::utils::error::StorageError;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes command output under one base directory. Absolute file names bypass it.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    fn create(&self, filename: &str) -> Result<(PathBuf, BufWriter<fs::File>), StorageError> {
        let file_path = self.path(filename);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&file_path)?;
        Ok((file_path, BufWriter::new(file)))
    }

    /// Pretty JSON with a 4-space indent. Replaces any existing file.
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T, filename: &str) -> Result<PathBuf, StorageError> {
        let (file_path, mut writer) = self.create(filename)?;

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        value.serialize(&mut ser)?;
        writer.flush()?;

        tracing::info!("Saved JSON to {}", file_path.display());
        Ok(file_path)
    }

    pub fn write_text(&self, text: &str, filename: &str) -> Result<PathBuf, StorageError> {
        let (file_path, mut writer) = self.create(filename)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        tracing::info!("Saved {} bytes to {}", text.len(), file_path.display());
        Ok(file_path)
    }

    /// One row per filing, headed by the SEC column names.
    pub fn write_submissions_csv(&self, rows: &[FilingRow], filename: &str) -> Result<PathBuf, StorageError> {
        let (file_path, writer) = self.create(filename)?;
        write_rows(rows, writer)?;

        tracing::info!("Saved {} filings to {}", rows.len(), file_path.display());
        Ok(file_path)
    }

    pub fn read_submissions_csv(&self, filename: &str) -> Result<Vec<FilingRow>, StorageError> {
        let mut rdr = csv::Reader::from_path(self.path(filename))?;
        let rows = rdr.deserialize().collect::<Result<Vec<FilingRow>, _>>()?;
        tracing::debug!("Read {} filings from {}", rows.len(), filename);
        Ok(rows)
    }
}

/// Streams filings as CSV to any writer (a file, or stdout for `submissions filter`).
pub fn write_rows<'a, I, W>(rows: I, writer: W) -> Result<(), StorageError>
where
    I: IntoIterator<Item = &'a FilingRow>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Appends `.csv` unless the name already ends with it.
pub fn normalize_csv_name(name: &str) -> String {
    if name.ends_with(".csv") {
        name.to_string()
    } else {
        format!("{}.csv", name)
    }
}

/// `record` if given (with `.csv` ensured), else `<company>_submissions.csv`.
pub fn submission_record_name(company: &str, record: Option<&str>) -> String {
    match record {
        Some(record) => normalize_csv_name(record),
        None => format!("{}_submissions.csv", company),
    }
}
