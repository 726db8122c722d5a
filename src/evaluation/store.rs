use log::{debug, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::evaluation::EvaluationId;
use crate::evaluation::records::{EquipmentRecord, LiftingRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Append-only row store keyed by evaluation ID.
///
/// The hosted deployment writes to a shared spreadsheet; anything that can
/// append a flat row to a named sheet and read it back fits here.
pub trait EvaluationStore {
    fn append_lifting(&mut self, record: &LiftingRecord) -> Result<(), StoreError>;

    fn append_equipment(&mut self, record: &EquipmentRecord) -> Result<(), StoreError>;

    fn find_lifting(&self, id: &EvaluationId) -> Result<Option<LiftingRecord>, StoreError>;

    fn find_equipment(&self, id: &EvaluationId) -> Result<Option<EquipmentRecord>, StoreError>;
}

/// One CSV file per sheet inside a directory
#[derive(Debug, Clone)]
pub struct CsvStore {
    directory: PathBuf,
    lifting_sheet: String,
    equipment_sheet: String,
}

impl CsvStore {
    /// Open (and create if needed) the store directory
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open_in(&config.directory, config)
    }

    /// Same as [`CsvStore::open`] with the directory overridden
    pub fn open_in(directory: impl AsRef<Path>, config: &StoreConfig) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        Ok(Self {
            directory,
            lifting_sheet: config.lifting_sheet.clone(),
            equipment_sheet: config.equipment_sheet.clone(),
        })
    }

    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.directory.join(format!("{}.csv", sheet))
    }

    pub fn lifting_rows(&self) -> Result<Vec<LiftingRecord>, StoreError> {
        self.rows(&self.lifting_sheet)
    }

    pub fn equipment_rows(&self) -> Result<Vec<EquipmentRecord>, StoreError> {
        self.rows(&self.equipment_sheet)
    }

    fn append<T: Serialize>(&self, sheet: &str, record: &T) -> Result<(), StoreError> {
        let path = self.sheet_path(sheet);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        debug!("appended row to {}", path.display());
        Ok(())
    }

    fn rows<T: DeserializeOwned>(&self, sheet: &str) -> Result<Vec<T>, StoreError> {
        let path = self.sheet_path(sheet);
        if !path.exists() {
            return Ok(Vec::new());
        }

        // Sheets may be edited by hand; a bad row is skipped, not fatal
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            match row {
                Ok(row) => rows.push(row),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => warn!("skipping unreadable row in {}: {}", path.display(), err),
            }
        }
        Ok(rows)
    }
}

impl EvaluationStore for CsvStore {
    fn append_lifting(&mut self, record: &LiftingRecord) -> Result<(), StoreError> {
        self.append(&self.lifting_sheet, record)?;
        info!("stored lifting data for evaluation {}", record.id);
        Ok(())
    }

    fn append_equipment(&mut self, record: &EquipmentRecord) -> Result<(), StoreError> {
        self.append(&self.equipment_sheet, record)?;
        info!("stored equipment data for evaluation {}", record.id);
        Ok(())
    }

    fn find_lifting(&self, id: &EvaluationId) -> Result<Option<LiftingRecord>, StoreError> {
        Ok(self.lifting_rows()?.into_iter().find(|row| &row.id == id))
    }

    fn find_equipment(&self, id: &EvaluationId) -> Result<Option<EquipmentRecord>, StoreError> {
        Ok(self.equipment_rows()?.into_iter().find(|row| &row.id == id))
    }
}
