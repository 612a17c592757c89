//! Filter and sort state for the measurement record table.
//!
//! The table's view state is an explicit value: a client (or the list
//! endpoint) builds a [`RecordViewState`] and applies it to a snapshot of
//! records. Nothing here mutates shared state.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record access
// ---------------------------------------------------------------------------

/// Text columns that accept a substring filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Model,
    Task,
    Gpu,
    GpuLocation,
    CodeEnvironment,
    GithubUser,
}

/// Numeric columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Energy,
    Emissions,
    Runtime,
    EmissionsRate,
}

/// Column access the view state needs from a stored record.
pub trait ViewableRecord {
    /// Text value of a filterable column, `None` when the record lacks it.
    fn text(&self, field: FilterField) -> Option<&str>;

    /// Numeric value of a sortable column. Derived columns are computed.
    fn number(&self, key: SortKey) -> f64;
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Case-insensitive substring filters. Empty or absent means "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilters {
    pub model: Option<String>,
    pub task: Option<String>,
    pub gpu: Option<String>,
    pub gpu_location: Option<String>,
    pub code_environment: Option<String>,
    pub github_user: Option<String>,
}

impl RecordFilters {
    fn active(&self) -> Vec<(FilterField, String)> {
        [
            (FilterField::Model, &self.model),
            (FilterField::Task, &self.task),
            (FilterField::Gpu, &self.gpu),
            (FilterField::GpuLocation, &self.gpu_location),
            (FilterField::CodeEnvironment, &self.code_environment),
            (FilterField::GithubUser, &self.github_user),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((field, v.to_lowercase())),
            _ => None,
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    pub fn matches<R: ViewableRecord>(&self, record: &R) -> bool {
        self.active().iter().all(|(field, needle)| {
            record
                .text(*field)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
        })
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
    /// Original store order.
    #[default]
    Normal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortConfig {
    /// State after the user clicks the header for `key`.
    ///
    /// Repeated clicks cycle ascending -> descending -> normal; clicking a
    /// different column starts again at ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == Some(key) {
            match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Normal,
                SortDirection::Normal => SortDirection::Ascending,
            }
        } else {
            SortDirection::Ascending
        };
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Stable in-place sort. `Normal` or a missing key leaves order as is.
    pub fn sort<R: ViewableRecord>(&self, records: &mut [R]) {
        let Some(key) = self.key else {
            return;
        };
        match self.direction {
            SortDirection::Ascending => {
                records.sort_by(|a, b| a.number(key).total_cmp(&b.number(key)))
            }
            SortDirection::Descending => {
                records.sort_by(|a, b| b.number(key).total_cmp(&a.number(key)))
            }
            SortDirection::Normal => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Combined view state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordViewState {
    #[serde(default)]
    pub filters: RecordFilters,
    #[serde(default)]
    pub sort: SortConfig,
}

impl RecordViewState {
    /// Filter then sort a snapshot of records.
    pub fn apply<R: ViewableRecord>(&self, records: Vec<R>) -> Vec<R> {
        let mut visible: Vec<R> = records
            .into_iter()
            .filter(|r| self.filters.matches(r))
            .collect();
        self.sort.sort(&mut visible);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::emissions_rate;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        model: &'static str,
        gpu: &'static str,
        gpu_location: Option<&'static str>,
        energy: f64,
        emissions: f64,
        runtime: f64,
    }

    impl ViewableRecord for Row {
        fn text(&self, field: FilterField) -> Option<&str> {
            match field {
                FilterField::Model => Some(self.model),
                FilterField::Gpu => Some(self.gpu),
                FilterField::GpuLocation => self.gpu_location,
                _ => None,
            }
        }

        fn number(&self, key: SortKey) -> f64 {
            match key {
                SortKey::Energy => self.energy,
                SortKey::Emissions => self.emissions,
                SortKey::Runtime => self.runtime,
                SortKey::EmissionsRate => emissions_rate(self.emissions, self.runtime),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                model: "Gemma-2B",
                gpu: "T4",
                gpu_location: Some("Singapore"),
                energy: 0.05,
                emissions: 25.0,
                runtime: 25.0,
            },
            Row {
                model: "LLaMA-2-7B",
                gpu: "A100",
                gpu_location: None,
                energy: 0.12,
                emissions: 56.0,
                runtime: 24.0,
            },
            Row {
                model: "Gemma-7B",
                gpu: "A100",
                gpu_location: Some("Iowa"),
                energy: 0.15,
                emissions: 70.0,
                runtime: 32.0,
            },
        ]
    }

    fn models(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.model).collect()
    }

    #[test]
    fn empty_filters_match_everything() {
        let state = RecordViewState::default();
        assert!(state.filters.is_empty());
        assert_eq!(state.apply(rows()), rows());
    }

    #[test]
    fn filters_are_case_insensitive_substrings() {
        let state = RecordViewState {
            filters: RecordFilters {
                model: Some("gemma".into()),
                gpu: Some("a1".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(models(&state.apply(rows())), vec!["Gemma-7B"]);
    }

    #[test]
    fn missing_column_fails_a_non_empty_filter() {
        let state = RecordViewState {
            filters: RecordFilters {
                gpu_location: Some("o".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(models(&state.apply(rows())), vec!["Gemma-2B", "Gemma-7B"]);
    }

    #[test]
    fn empty_string_filter_is_ignored() {
        let filters = RecordFilters {
            gpu_location: Some(String::new()),
            ..Default::default()
        };
        assert!(filters.is_empty());
    }

    #[test]
    fn toggling_cycles_through_three_states() {
        let sort = SortConfig::default().toggled(SortKey::Energy);
        assert_eq!(sort.direction, SortDirection::Ascending);
        let sort = sort.toggled(SortKey::Energy);
        assert_eq!(sort.direction, SortDirection::Descending);
        let sort = sort.toggled(SortKey::Energy);
        assert_eq!(sort.direction, SortDirection::Normal);
        let sort = sort.toggled(SortKey::Energy);
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn switching_column_restarts_at_ascending() {
        let sort = SortConfig::default()
            .toggled(SortKey::Energy)
            .toggled(SortKey::Energy)
            .toggled(SortKey::Runtime);
        assert_eq!(sort.key, Some(SortKey::Runtime));
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn sorts_by_computed_emissions_rate() {
        let state = RecordViewState {
            sort: SortConfig {
                key: Some(SortKey::EmissionsRate),
                direction: SortDirection::Descending,
            },
            ..Default::default()
        };
        // Emissions per runtime minute: 1.00, 2.33, 2.19.
        assert_eq!(
            models(&state.apply(rows())),
            vec!["LLaMA-2-7B", "Gemma-7B", "Gemma-2B"]
        );
    }

    #[test]
    fn normal_direction_keeps_store_order() {
        let state = RecordViewState {
            sort: SortConfig {
                key: Some(SortKey::Energy),
                direction: SortDirection::Normal,
            },
            ..Default::default()
        };
        assert_eq!(state.apply(rows()), rows());
    }

    #[test]
    fn ascending_sort_is_stable() {
        let mut data = rows();
        data[2].energy = 0.05;
        let sort = SortConfig {
            key: Some(SortKey::Energy),
            direction: SortDirection::Ascending,
        };
        sort.sort(&mut data);
        assert_eq!(models(&data), vec!["Gemma-2B", "Gemma-7B", "LLaMA-2-7B"]);
    }

    #[test]
    fn view_state_round_trips_through_json() {
        let json = serde_json::json!({
            "filters": { "model": "gemma" },
            "sort": { "key": "emissions_rate", "direction": "ascending" }
        });
        let state: RecordViewState = serde_json::from_value(json).unwrap();
        assert_eq!(state.filters.model.as_deref(), Some("gemma"));
        assert_eq!(state.sort.key, Some(SortKey::EmissionsRate));
        let defaulted: RecordViewState = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(defaulted, RecordViewState::default());
    }
}
