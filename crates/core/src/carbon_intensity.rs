//! Region carbon-intensity table loaded from an Our World in Data style CSV.
//!
//! Load policy: rows with a blank entity or a missing, non-numeric,
//! non-finite or negative intensity are skipped and reported in
//! [`RegionLoad::skipped`]. Missing required columns, CSV syntax errors and
//! I/O errors fail the whole load, as does a source with no usable rows.
//! When an entity appears once per year, the most recent year wins; without
//! a `Year` column the last row wins.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Serialize;

/// Column holding the region / entity name.
pub const ENTITY_COLUMN: &str = "Entity";
/// Column holding grams CO2 per kWh of grid electricity.
pub const INTENSITY_COLUMN: &str = "Carbon intensity of electricity - gCO2/kWh";
/// Optional column holding the observation year.
pub const YEAR_COLUMN: &str = "Year";

#[derive(Debug, thiserror::Error)]
pub enum CarbonIntensityError {
    #[error("Failed to read carbon intensity source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed carbon intensity CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Carbon intensity CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Carbon intensity CSV contains no usable rows")]
    Empty,

    #[error("Failed to fetch carbon intensity source: {0}")]
    Fetch(String),
}

/// A data row rejected during load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the source (header is line 1).
    pub line: u64,
    pub reason: String,
}

/// Outcome of a successful load: the table plus the rows it left out.
#[derive(Debug, Clone)]
pub struct RegionLoad {
    pub table: RegionCarbonIntensity,
    pub skipped: Vec<SkippedRow>,
}

/// Region name -> carbon intensity (g CO2 / kWh). Exact, case-sensitive keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCarbonIntensity {
    intensities: BTreeMap<String, f64>,
}

impl RegionCarbonIntensity {
    /// Parse a CSV source. See the module docs for the row policy.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<RegionLoad, CarbonIntensityError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let entity_idx = column(ENTITY_COLUMN).ok_or(CarbonIntensityError::MissingColumn(ENTITY_COLUMN))?;
        let intensity_idx =
            column(INTENSITY_COLUMN).ok_or(CarbonIntensityError::MissingColumn(INTENSITY_COLUMN))?;
        let year_idx = column(YEAR_COLUMN);

        let mut latest: BTreeMap<String, (Option<i32>, f64)> = BTreeMap::new();
        let mut skipped = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row_idx as u64 + 2);

            match parse_row(&record, entity_idx, intensity_idx, year_idx) {
                Ok((entity, year, intensity)) => {
                    let replace = match latest.get(&entity) {
                        Some((seen_year, _)) => year >= *seen_year,
                        None => true,
                    };
                    if replace {
                        latest.insert(entity, (year, intensity));
                    }
                }
                Err(reason) => skipped.push(SkippedRow { line, reason }),
            }
        }

        if latest.is_empty() {
            return Err(CarbonIntensityError::Empty);
        }

        let intensities = latest
            .into_iter()
            .map(|(entity, (_, intensity))| (entity, intensity))
            .collect();
        Ok(RegionLoad {
            table: Self { intensities },
            skipped,
        })
    }

    pub fn from_csv_str(text: &str) -> Result<RegionLoad, CarbonIntensityError> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Intensity for an exact region name.
    pub fn get(&self, region: &str) -> Option<f64> {
        self.intensities.get(region).copied()
    }

    /// Region names in sorted order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.intensities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RegionCarbonIntensity {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            intensities: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn parse_row(
    record: &csv::StringRecord,
    entity_idx: usize,
    intensity_idx: usize,
    year_idx: Option<usize>,
) -> Result<(String, Option<i32>, f64), String> {
    let entity = record.get(entity_idx).unwrap_or_default();
    if entity.is_empty() {
        return Err("blank entity name".to_string());
    }

    let raw = record.get(intensity_idx).unwrap_or_default();
    if raw.is_empty() {
        return Err(format!("missing intensity for '{entity}'"));
    }
    let intensity: f64 = raw
        .parse()
        .map_err(|_| format!("non-numeric intensity '{raw}' for '{entity}'"))?;
    if !intensity.is_finite() || intensity < 0.0 {
        return Err(format!("invalid intensity {intensity} for '{entity}'"));
    }

    let year = match year_idx.and_then(|idx| record.get(idx)) {
        Some(raw_year) if !raw_year.is_empty() => Some(
            raw_year
                .parse::<i32>()
                .map_err(|_| format!("non-numeric year '{raw_year}' for '{entity}'"))?,
        ),
        _ => None,
    };

    Ok((entity.to_string(), year, intensity))
}
