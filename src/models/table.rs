use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::models::WeatherRecord;

/// A fully loaded weather file. Immutable once built; every query reloads.
#[derive(Debug, Clone, Default)]
pub struct WeatherTable {
    records: Vec<WeatherRecord>,
    dropped_rows: usize,
    source: Option<PathBuf>,
}

impl WeatherTable {
    pub fn new(records: Vec<WeatherRecord>) -> Self {
        Self {
            records,
            dropped_rows: 0,
            source: None,
        }
    }

    pub fn from_source(records: Vec<WeatherRecord>, dropped_rows: usize, source: &Path) -> Self {
        Self {
            records,
            dropped_rows,
            source: Some(source.to_path_buf()),
        }
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows skipped at load time for a missing location or temperature
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }

    pub fn locations(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.location.as_str()).collect()
    }

    pub fn out_of_range_records(&self) -> usize {
        self.records.iter().filter(|r| !r.is_within_ranges()).count()
    }

    pub fn summary(&self) -> String {
        let source = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<in-memory>".to_string());
        let date_range = match self.date_range() {
            Some((first, last)) => format!("{} to {}", first, last),
            None => "No dated records".to_string(),
        };

        format!(
            "Source: {}\n\
            Records: {} loaded, {} dropped\n\
            Date Range: {}\n\
            Locations: {}\n\
            Out-of-range records: {}",
            source,
            self.len(),
            self.dropped_rows,
            date_range,
            self.locations().len(),
            self.out_of_range_records()
        )
    }
}

impl From<Vec<WeatherRecord>> for WeatherTable {
    fn from(records: Vec<WeatherRecord>) -> Self {
        Self::new(records)
    }
}
