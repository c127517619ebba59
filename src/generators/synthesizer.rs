use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::models::{ClimateBand, WeatherRecord};
use crate::utils::constants::{
    BASE_YEAR, CONDITIONS, DAYS_PER_CYCLE, LOCATIONS, MAX_HUMIDITY, MAX_PRECIPITATION,
    MAX_WIND_SPEED, MIN_HUMIDITY, MIN_PRECIPITATION, MIN_WIND_SPEED, RAIN_PROBABILITY,
};
use crate::utils::progress::ProgressReporter;
use crate::utils::rounding::round2;
use crate::writers::CsvWriter;

const PROGRESS_STEP: usize = 100;

/// Produces plausible daily observations for the ten dashboard cities.
pub struct RecordSynthesizer {
    seed: Option<u64>,
    base_date: NaiveDate,
}

impl RecordSynthesizer {
    pub fn new() -> Self {
        Self {
            seed: None,
            base_date: NaiveDate::from_ymd_opt(BASE_YEAR, 1, 1).unwrap_or_default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_base_date(mut self, base_date: NaiveDate) -> Self {
        self.base_date = base_date;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Date for record `index`; wraps once every 365 records
    pub fn date_for_index(&self, index: usize) -> NaiveDate {
        let offset = (index as u64 % DAYS_PER_CYCLE) as i64;
        self.base_date + Duration::days(offset)
    }

    pub fn synthesize(&self, num_records: usize) -> Vec<WeatherRecord> {
        self.synthesize_with_progress(num_records, None)
    }

    pub fn synthesize_with_progress(
        &self,
        num_records: usize,
        progress: Option<&ProgressReporter>,
    ) -> Vec<WeatherRecord> {
        let mut rng = self.rng();
        let mut records = Vec::with_capacity(num_records);

        for index in 0..num_records {
            records.push(self.synthesize_record(index, &mut rng));

            if (index + 1) % PROGRESS_STEP == 0 {
                if let Some(p) = progress {
                    p.update((index + 1) as u64);
                }
            }
        }

        if let Some(p) = progress {
            p.update(num_records as u64);
        }

        records
    }

    fn synthesize_record<R: Rng>(&self, index: usize, rng: &mut R) -> WeatherRecord {
        let date = self.date_for_index(index);
        let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];

        let band = ClimateBand::for_location(location);
        let (noise_low, noise_high) = band.noise_range();
        let temperature = band.base_temperature(date.month()) + rng.gen_range(noise_low..=noise_high);

        let humidity = rng.gen_range(MIN_HUMIDITY..=MAX_HUMIDITY);
        let precipitation = if rng.gen_bool(RAIN_PROBABILITY) {
            rng.gen_range(MIN_PRECIPITATION..=MAX_PRECIPITATION)
        } else {
            0.0
        };
        let wind_speed = rng.gen_range(MIN_WIND_SPEED..=MAX_WIND_SPEED);
        let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];

        WeatherRecord::new(Some(date), location, round2(temperature))
            .with_humidity(round2(humidity))
            .with_precipitation(round2(precipitation))
            .with_wind_speed(round2(wind_speed))
            .with_condition(condition)
    }

    /// Write `num_records` synthetic rows to `destination`, replacing any
    /// existing file. Returns the destination path.
    pub fn generate(&self, num_records: usize, destination: &Path) -> Result<PathBuf> {
        self.generate_with_progress(num_records, destination, None)
    }

    pub fn generate_with_progress(
        &self,
        num_records: usize,
        destination: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<PathBuf> {
        let records = self.synthesize_with_progress(num_records, progress);
        let path = CsvWriter::new().write_records(&records, destination)?;

        info!(
            records = num_records,
            path = %path.display(),
            "Generated weather records"
        );
        Ok(path)
    }
}

impl Default for RecordSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::WeatherReader;
    use std::collections::HashSet;
    use tempfile::TempDir;
    use validator::Validate;

    #[test]
    fn test_dates_cycle_every_365_records() {
        let synthesizer = RecordSynthesizer::new().with_seed(7);
        let records = synthesizer.synthesize(800);

        let jan_first = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert_eq!(records[0].date, jan_first);
        assert_eq!(records[364].date, NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(records[365].date, jan_first);
        assert_eq!(records[730].date, jan_first);

        let distinct: HashSet<_> = records.iter().filter_map(|r| r.date).collect();
        assert_eq!(distinct.len(), 365);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = RecordSynthesizer::new().with_seed(42).synthesize(200);
        let b = RecordSynthesizer::new().with_seed(42).synthesize(200);
        let c = RecordSynthesizer::new().with_seed(43).synthesize(200);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fields_within_ranges() {
        let records = RecordSynthesizer::new().with_seed(1).synthesize(1000);

        for record in &records {
            assert!(record.validate().is_ok(), "out of range: {:?}", record);
            assert!(record.is_complete());
            assert!(LOCATIONS.contains(&record.location.as_str()));
            assert!(CONDITIONS.contains(&record.condition.as_deref().unwrap()));

            let month = record.date.unwrap().month();
            let band = record.climate_band();
            let (low, high) = band.noise_range();
            let base = band.base_temperature(month);
            assert!(record.temperature >= round2(base + low) - 0.01);
            assert!(record.temperature <= round2(base + high) + 0.01);
        }

        let dry = records
            .iter()
            .filter(|r| r.precipitation == Some(0.0))
            .count();
        // Roughly 70% of days are dry
        assert!(dry > 600 && dry < 800, "dry days: {}", dry);
    }

    #[test]
    fn test_numeric_fields_rounded() {
        let records = RecordSynthesizer::new().with_seed(9).synthesize(300);
        for record in records {
            for value in [
                Some(record.temperature),
                record.humidity,
                record.precipitation,
                record.wind_speed,
            ]
            .into_iter()
            .flatten()
            {
                assert_eq!(round2(value), value);
            }
        }
    }

    #[test]
    fn test_generate_writes_loadable_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let destination = temp_dir.path().join("data").join("weather_data.csv");

        let path = RecordSynthesizer::new()
            .with_seed(3)
            .generate(50, &destination)?;
        assert_eq!(path, destination);

        let table = WeatherReader::new().load(&path)?;
        assert_eq!(table.len(), 50);
        assert_eq!(table.dropped_rows(), 0);
        assert_eq!(
            table.records(),
            RecordSynthesizer::new().with_seed(3).synthesize(50).as_slice()
        );

        Ok(())
    }
}
