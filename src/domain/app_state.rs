use std::{ops::RangeInclusive, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{
    dataset::Dataset,
    elasticity::DEFAULT_CURVE_POINTS,
    entities::ElasticityParameters,
    simulation::{DashboardSnapshot, SimulationState},
    source::DataSource,
};

/// Accepted curve resolutions.
pub const CURVE_POINTS_RANGE: RangeInclusive<usize> = 2..=200;

/// Outcome of loading the selected source.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DatasetStatus {
    #[default]
    NotLoaded,
    Loaded(Arc<Dataset>),
    Failed { label: String, message: String },
}

impl DatasetStatus {
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match self {
            DatasetStatus::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub source: DataSource,
    pub dataset: DatasetStatus,
    /// Never persisted; resets with every launch.
    pub simulation: SimulationState,
    pub params: ElasticityParameters,
    pub settings: DashboardSettings,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: DashboardSettings) {
        let persisted = persisted.validated();
        self.source = DataSource::default_for(persisted.dataset_path.as_ref());
        self.settings = persisted;
    }

    pub fn to_persisted(&self) -> DashboardSettings {
        self.settings.clone()
    }

    /// Recomputes every derived metric from the current dataset and slider value.
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.dataset.dataset().map(|dataset| {
            DashboardSnapshot::compute(
                dataset,
                &self.simulation,
                &self.params,
                self.settings.curve_points,
            )
        })
    }
}

/// User configuration stored between sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_curve_points")]
    pub curve_points: usize,
    /// CSV used instead of the bundled sample when set.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

fn default_curve_points() -> usize {
    DEFAULT_CURVE_POINTS
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            curve_points: DEFAULT_CURVE_POINTS,
            dataset_path: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("curve points must be a whole number")]
    CurvePointsNotNumeric,
    #[error("curve points must be between {min} and {max}")]
    CurvePointsOutOfRange { min: usize, max: usize },
    #[error("dataset path must point to a .csv file")]
    NotACsvPath,
}

impl DashboardSettings {
    /// Builds settings from raw form input. An empty path clears the override.
    pub fn parse(curve_points: &str, dataset_path: &str) -> Result<Self, SettingsError> {
        let curve_points: usize = curve_points
            .trim()
            .parse()
            .map_err(|_| SettingsError::CurvePointsNotNumeric)?;
        if !CURVE_POINTS_RANGE.contains(&curve_points) {
            return Err(SettingsError::CurvePointsOutOfRange {
                min: *CURVE_POINTS_RANGE.start(),
                max: *CURVE_POINTS_RANGE.end(),
            });
        }

        let dataset_path = match dataset_path.trim() {
            "" => None,
            raw => {
                let path = PathBuf::from(raw);
                let is_csv = path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false);
                if !is_csv {
                    return Err(SettingsError::NotACsvPath);
                }
                Some(path)
            }
        };

        Ok(Self {
            curve_points,
            dataset_path,
        })
    }

    /// Replaces values a hand-edited or stale settings file may carry outside the
    /// accepted ranges.
    pub fn validated(mut self) -> Self {
        if !CURVE_POINTS_RANGE.contains(&self.curve_points) {
            warn!(
                curve_points = self.curve_points,
                default = DEFAULT_CURVE_POINTS,
                "stored curve points out of range; using default"
            );
            self.curve_points = DEFAULT_CURVE_POINTS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_input() {
        let settings = DashboardSettings::parse(" 20 ", "/tmp/sales.CSV").unwrap();
        assert_eq!(settings.curve_points, 20);
        assert_eq!(settings.dataset_path, Some(PathBuf::from("/tmp/sales.CSV")));

        let cleared = DashboardSettings::parse("50", "  ").unwrap();
        assert_eq!(cleared.dataset_path, None);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            DashboardSettings::parse("many", ""),
            Err(SettingsError::CurvePointsNotNumeric)
        );
        assert_eq!(
            DashboardSettings::parse("1", ""),
            Err(SettingsError::CurvePointsOutOfRange { min: 2, max: 200 })
        );
        assert_eq!(
            DashboardSettings::parse("20", "/tmp/sales.xlsx"),
            Err(SettingsError::NotACsvPath)
        );
    }

    #[test]
    fn persisted_settings_fill_missing_fields() {
        let settings: DashboardSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn validated_resets_out_of_range_curve_points() {
        for bad in [0, 1, 201, 50_000_000] {
            let settings = DashboardSettings {
                curve_points: bad,
                dataset_path: Some(PathBuf::from("sales.csv")),
            }
            .validated();
            assert_eq!(settings.curve_points, DEFAULT_CURVE_POINTS, "curve_points {bad}");
            assert_eq!(settings.dataset_path, Some(PathBuf::from("sales.csv")));
        }
        for good in [2, 50, 200] {
            let settings = DashboardSettings {
                curve_points: good,
                dataset_path: None,
            };
            assert_eq!(settings.clone().validated(), settings);
        }
    }

    #[test]
    fn applying_settings_switches_default_source() {
        let mut state = AppState::default();
        state.apply_persisted(DashboardSettings {
            curve_points: 30,
            dataset_path: Some(PathBuf::from("sales.csv")),
        });
        assert_eq!(
            state.source,
            DataSource::ConfiguredFile(PathBuf::from("sales.csv"))
        );
        assert_eq!(state.to_persisted().curve_points, 30);
    }

    #[test]
    fn no_snapshot_until_a_dataset_is_loaded() {
        let mut state = AppState::default();
        assert!(state.snapshot().is_none());
        state.dataset = DatasetStatus::Failed {
            label: "broken.csv".to_string(),
            message: "bad".to_string(),
        };
        assert!(state.snapshot().is_none());
    }
}
