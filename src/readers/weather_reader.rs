use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{WeatherRecord, WeatherTable};
use crate::utils::constants::DATE_FORMAT;

/// A CSV row before typing. Every column is optional so a sparse or
/// hand-edited file still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeatherRow {
    pub date: Option<String>,
    pub location: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub precipitation: Option<String>,
    pub wind_speed: Option<String>,
    pub condition: Option<String>,
}

impl RawWeatherRow {
    /// Type the row. `None` when the location or temperature is missing or
    /// unparseable; other unparseable fields become null.
    pub fn into_record(self) -> Option<WeatherRecord> {
        let location = non_empty(self.location)?;
        let temperature = parse_number(self.temperature.as_deref())?;

        Some(WeatherRecord {
            date: self
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), DATE_FORMAT).ok()),
            location,
            temperature,
            humidity: parse_number(self.humidity.as_deref()),
            precipitation: parse_number(self.precipitation.as_deref()),
            wind_speed: parse_number(self.wind_speed.as_deref()),
            condition: non_empty(self.condition),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub struct WeatherReader;

impl WeatherReader {
    pub fn new() -> Self {
        Self
    }

    /// Load and type a weather file, silently dropping rows without a
    /// location or temperature.
    pub fn load(&self, path: &Path) -> Result<WeatherTable> {
        let rows = self.read_raw_rows(path)?;
        let mut dropped = rows.undecodable;
        let mut records = Vec::with_capacity(rows.rows.len());

        for row in rows.rows {
            match row.into_record() {
                Some(record) => records.push(record),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, path = %path.display(), "Dropped rows without location or temperature");
        }

        Ok(WeatherTable::from_source(records, dropped, path))
    }

    /// Read untyped rows. Undecodable rows are counted, I/O errors propagate.
    pub fn read_raw_rows(&self, path: &Path) -> Result<RawRows> {
        if !path.exists() {
            return Err(DashboardError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        self.read_raw_rows_from(BufReader::new(file))
    }

    pub fn read_raw_rows_from<R: Read>(&self, reader: R) -> Result<RawRows> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut raw = RawRows::default();
        for result in csv_reader.deserialize::<RawWeatherRow>() {
            match result {
                Ok(row) => raw.rows.push(row),
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
                Err(e) => {
                    debug!(error = %e, "Skipping undecodable row");
                    raw.undecodable += 1;
                }
            }
        }

        Ok(raw)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct RawRows {
    pub rows: Vec<RawWeatherRow>,
    pub undecodable: usize,
}
