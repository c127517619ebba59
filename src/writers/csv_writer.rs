use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::models::WeatherRecord;

pub struct CsvWriter {
    buffer_size: usize,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            buffer_size: 8192 * 16, // 128KB
        }
    }

    /// Write records with a header row, replacing any existing file and
    /// creating the parent directory if needed.
    pub fn write_records(&self, records: &[WeatherRecord], path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let buffered = BufWriter::with_capacity(self.buffer_size, file);
        self.write_to(records, buffered)?;

        debug!(records = records.len(), path = %path.display(), "Wrote weather file");
        Ok(path.to_path_buf())
    }

    pub fn write_to<W: Write>(&self, records: &[WeatherRecord], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
