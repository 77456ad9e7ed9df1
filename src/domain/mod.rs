//! Pricing and return analytics live here; nothing in this module touches the UI.

pub mod app_state;
pub mod dataset;
pub mod elasticity;
pub mod entities;
pub mod returns;
pub mod simulation;
pub mod source;

pub use app_state::{AppState, DashboardSettings, DatasetStatus, SettingsError, CURVE_POINTS_RANGE};
pub use dataset::Dataset;
pub use elasticity::{revenue_indicator, RevenueIndicator, RevenueIndicatorStatus};
pub use entities::{
    CurvePoint, DatasetSchema, ElasticityParameters, MarkdownBox, Projection, SalesRecord,
    MAX_PRICE_CHANGE_PCT, MIN_PRICE_CHANGE_PCT,
};
pub use simulation::{DashboardSnapshot, SimulationState};
pub use source::{DataSource, Placeholder, SourceKey};
