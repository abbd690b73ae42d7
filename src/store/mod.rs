// src/store/mod.rs

//! Flat-file persistence for every table.
//!
//! Each table is one CSV file under the data directory. Writes go through a
//! temp file in the same directory followed by a rename, under a per-table
//! lock, so a row is either fully committed or absent.

mod table;

pub use table::{Record, TableKind};

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("Table {table} is missing columns: {}", missing.join(", "))]
    SchemaMismatch {
        table: &'static str,
        missing: Vec<String>,
    },

    #[error("Uploaded {0} has no data rows")]
    EmptyUpload(&'static str),

    #[error("Row {row} of {table} is invalid: {reason}")]
    InvalidRow {
        table: &'static str,
        row: usize,
        reason: String,
    },
}

pub struct RecordStore {
    data_dir: PathBuf,
    locks: HashMap<TableKind, Mutex<()>>,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let locks = TableKind::ALL
            .iter()
            .map(|kind| (*kind, Mutex::new(())))
            .collect();
        Self {
            data_dir: data_dir.into(),
            locks,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, kind: TableKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    fn lock(&self, kind: TableKind) -> MutexGuard<'_, ()> {
        // A panic while holding the guard cannot leave a half-written table behind.
        self.locks[&kind]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates the table with its header row if it is absent or zero-length.
    pub fn ensure(&self, kind: TableKind) -> Result<(), StoreError> {
        let _guard = self.lock(kind);
        self.ensure_locked(kind)
    }

    fn ensure_locked(&self, kind: TableKind) -> Result<(), StoreError> {
        let needs_header = match fs::metadata(self.path(kind)) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        if needs_header {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(kind.header())?;
            let contents = finish(writer)?;
            self.write_atomic(kind, &contents)?;
            tracing::info!("Initialized table {}", kind.file_name());
        }
        Ok(())
    }

    /// Appends one row, initializing the table first if needed.
    ///
    /// A table whose header differs from the canonical one (an older column
    /// set, or reordered columns) is rewritten under the canonical header
    /// first, so every row lines up with the columns it is read back by.
    pub fn append<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let kind = R::KIND;
        let _guard = self.lock(kind);
        self.ensure_locked(kind)?;

        let mut contents = fs::read(self.path(kind))?;
        if !has_canonical_header(kind, &contents)? {
            contents = canonicalize::<R>(kind, &contents)?;
            tracing::warn!("Rewrote {} under its current header", kind.file_name());
        }
        if !contents.is_empty() && !contents.ends_with(b"\n") {
            // Never glue the new row onto a truncated one.
            contents.push(b'\n');
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(contents);
        writer.serialize(record)?;
        let contents = finish(writer)?;

        self.write_atomic(kind, &contents)
    }

    /// Loads every parsable row. Missing or header-only tables yield an empty vector.
    pub fn load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let kind = R::KIND;
        let bytes = match fs::read(self.path(kind)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        parse_rows(kind, &bytes, false)
    }

    /// Like [`RecordStore::load`], but a schema mismatch is logged and read as an empty table.
    pub fn load_or_empty<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        match self.load::<R>() {
            Err(StoreError::SchemaMismatch { table, missing }) => {
                tracing::warn!(
                    "Table {} is missing columns {:?}; treating it as empty",
                    table,
                    missing
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Replaces the whole table with `contents` after strict validation.
    /// Returns the number of data rows written.
    pub fn replace<R: Record>(&self, contents: &[u8]) -> Result<usize, StoreError> {
        let kind = R::KIND;
        let rows: Vec<R> = parse_rows(kind, contents, true)?;
        if rows.is_empty() {
            return Err(StoreError::EmptyUpload(kind.file_name()));
        }
        for (i, row) in rows.iter().enumerate() {
            row.check().map_err(|reason| StoreError::InvalidRow {
                table: kind.file_name(),
                row: i + 1,
                reason,
            })?;
        }

        let _guard = self.lock(kind);
        self.write_atomic(kind, contents)?;
        tracing::info!("Replaced {} with {} rows", kind.file_name(), rows.len());
        Ok(rows.len())
    }

    /// Raw bytes of a table, or `None` if it does not exist.
    pub fn raw(&self, kind: TableKind) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path(kind)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the entire table. Irreversible.
    pub fn clear(&self, kind: TableKind) -> Result<(), StoreError> {
        let _guard = self.lock(kind);
        match fs::remove_file(self.path(kind)) {
            Ok(()) => {
                tracing::warn!("Cleared table {}", kind.file_name());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_atomic(&self, kind: TableKind, contents: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path(kind))
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
}

fn has_canonical_header(kind: TableKind, bytes: &[u8]) -> Result<bool, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);
    let headers = reader.headers()?;
    Ok(headers.iter().eq(kind.header().iter().copied()))
}

/// Re-serializes every readable row under the canonical header.
fn canonicalize<R: Record>(kind: TableKind, bytes: &[u8]) -> Result<Vec<u8>, StoreError> {
    let rows: Vec<R> = parse_rows(kind, bytes, false)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(kind.header())?;
    for row in &rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

/// Parses CSV bytes into typed rows.
///
/// In lenient mode rows that fail to deserialize are logged and skipped; in
/// strict mode the first such row is an error.
fn parse_rows<R: Record>(kind: TableKind, bytes: &[u8], strict: bool) -> Result<Vec<R>, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = kind
        .required_columns()
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::SchemaMismatch {
            table: kind.file_name(),
            missing,
        });
    }

    let mut rows = Vec::new();
    for (i, row) in reader.deserialize::<R>().enumerate() {
        match row {
            Ok(record) => rows.push(record),
            Err(e) if strict => {
                return Err(StoreError::InvalidRow {
                    table: kind.file_name(),
                    row: i + 1,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::warn!("Skipping unparsable row {} of {}: {}", i + 1, kind.file_name(), e);
            }
        }
    }
    Ok(rows)
}
