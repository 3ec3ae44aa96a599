use std::path::{Path, PathBuf};

use log::debug;
use rust_xlsxwriter::Workbook;
use tokio::sync::RwLock;

use crate::{Reading, Result, TIMESTAMP_FORMAT};

/// Append-only reading history with two on-disk mirrors: a CSV durable
/// record that is reloaded on startup and an XLSX export that is write-only.
///
/// Both mirrors are rewritten wholesale from the full in-memory sequence on
/// every append, so the write cost grows with history length. The in-memory
/// append is not rolled back when a mirror rewrite fails; callers get the
/// error, and the reading stays visible to queries until the next restart.
pub struct Store {
    readings: RwLock<Vec<Reading>>,
    csv_path: PathBuf,
    xlsx_path: PathBuf,
}

impl Store {
    /// Loads the prior durable record if one exists, otherwise starts empty.
    /// A malformed record file is an error.
    pub fn open(csv_path: impl Into<PathBuf>, xlsx_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();
        let xlsx_path = xlsx_path.into();

        let readings = if csv_path.exists() {
            let readings = read_csv(&csv_path)?;
            debug!("loaded {} readings from {}", readings.len(), csv_path.display());
            readings
        } else {
            vec![]
        };

        Ok(Self {
            readings: RwLock::new(readings),
            csv_path,
            xlsx_path,
        })
    }

    pub async fn append(&self, reading: Reading) -> Result<()> {
        let mut readings = self.readings.write().await;
        readings.push(reading);

        write_csv(&self.csv_path, &readings)?;
        write_xlsx(&self.xlsx_path, &readings)?;

        Ok(())
    }

    pub async fn latest(&self) -> Option<Reading> {
        self.readings.read().await.last().cloned()
    }

    /// Last `min(n, len)` readings in arrival order.
    pub async fn tail(&self, n: usize) -> Vec<Reading> {
        let readings = self.readings.read().await;
        let skip = readings.len().saturating_sub(n);

        readings[skip..].to_vec()
    }

    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn xlsx_path(&self) -> &Path {
        &self.xlsx_path
    }
}

fn read_csv(path: &Path) -> Result<Vec<Reading>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut readings = vec![];

    for record in reader.deserialize() {
        readings.push(record?);
    }

    Ok(readings)
}

fn write_csv(path: &Path, readings: &[Reading]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    for reading in readings {
        writer.serialize(reading)?;
    }

    writer.flush()?;

    Ok(())
}

fn write_xlsx(path: &Path, readings: &[Reading]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "timestamp")?;
    worksheet.write_string(0, 1, "temperature")?;
    worksheet.write_string(0, 2, "humidity")?;

    for (row, reading) in readings.iter().enumerate() {
        let row = row as u32 + 1;

        worksheet.write_string(row, 0, reading.timestamp.format(TIMESTAMP_FORMAT).to_string())?;
        worksheet.write_number(row, 1, reading.temperature)?;
        worksheet.write_number(row, 2, reading.humidity)?;
    }

    workbook.save(path)?;

    Ok(())
}
