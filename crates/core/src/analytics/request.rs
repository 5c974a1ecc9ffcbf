//! Validated request types for the two analytical job kinds.
//!
//! These are constructed by the HTTP layer (via serde + validator) and
//! consumed once per job by the orchestrator. All fields are plain data;
//! nothing here touches the filesystem or the database.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// Forecast model family requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Arima,
    #[default]
    Xgboost,
    Ensemble,
}

impl ModelType {
    /// The tag passed to the worker and stored in `predictions.model_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arima => "arima",
            Self::Xgboost => "xgboost",
            Self::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination filter for a forecast: one destination or all of them.
///
/// Accepts `"all"`, a numeric id, or a numeric string on the wire, since
/// dashboard clients send the select-box value either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationScope {
    #[default]
    All,
    One(DbId),
}

impl DestinationScope {
    /// The destination id when the scope is singular.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Self::All => None,
            Self::One(id) => Some(*id),
        }
    }
}

impl fmt::Display for DestinationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::One(id) => write!(f, "{id}"),
        }
    }
}

impl<'de> Deserialize<'de> for DestinationScope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(DbId),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(Self::One(id)),
            Raw::Text(s) if s == "all" => Ok(Self::All),
            Raw::Text(s) => s.parse().map(Self::One).map_err(|_| {
                serde::de::Error::custom(format!(
                    "destination_id must be \"all\" or a destination id, got \"{s}\""
                ))
            }),
        }
    }
}

impl serde::Serialize for DestinationScope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::One(id) => serializer.serialize_i64(*id),
        }
    }
}

/// Which data source a forecast worker was actually pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    UploadedDataset,
    Database,
}

/// Request body for `POST /predictions/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeneratePredictions {
    #[serde(default)]
    pub model_type: ModelType,
    #[serde(default)]
    pub destination_id: DestinationScope,
    /// Number of future days to forecast.
    #[serde(default = "default_forecast_days")]
    #[validate(range(min = 1, max = 365))]
    pub forecast_days: u32,
    /// Run the worker against an uploaded CSV instead of the live database.
    #[serde(default)]
    pub use_uploaded_csv: bool,
    /// Stored filename of a previously uploaded dataset.
    #[serde(default)]
    pub csv_filename: Option<String>,
}

fn default_forecast_days() -> u32 {
    30
}

/// Request body for `POST /analytics/market-basket`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarketBasketParams {
    #[serde(default = "default_min_support")]
    #[validate(range(min = 0.0001, max = 1.0))]
    pub min_support: f64,
    #[serde(default = "default_min_confidence")]
    #[validate(range(min = 0.0001, max = 1.0))]
    pub min_confidence: f64,
    #[serde(default = "default_min_lift")]
    #[validate(range(min = 0.0))]
    pub min_lift: f64,
}

fn default_min_support() -> f64 {
    0.01
}

fn default_min_confidence() -> f64 {
    0.3
}

fn default_min_lift() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_deserializes_from_all_keyword() {
        let scope: DestinationScope = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(scope, DestinationScope::All);
    }

    #[test]
    fn scope_deserializes_from_number_and_numeric_string() {
        let scope: DestinationScope = serde_json::from_str("7").unwrap();
        assert_eq!(scope, DestinationScope::One(7));

        let scope: DestinationScope = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(scope, DestinationScope::One(7));
    }

    #[test]
    fn scope_rejects_garbage() {
        let result: Result<DestinationScope, _> = serde_json::from_str("\"everywhere\"");
        assert!(result.is_err());
    }

    #[test]
    fn scope_displays_as_worker_flag_value() {
        assert_eq!(DestinationScope::All.to_string(), "all");
        assert_eq!(DestinationScope::One(12).to_string(), "12");
    }

    #[test]
    fn generate_predictions_defaults() {
        let req: GeneratePredictions = serde_json::from_str("{}").unwrap();
        assert_eq!(req.model_type, ModelType::Xgboost);
        assert_eq!(req.destination_id, DestinationScope::All);
        assert_eq!(req.forecast_days, 30);
        assert!(!req.use_uploaded_csv);
        assert!(req.csv_filename.is_none());
    }

    #[test]
    fn forecast_days_out_of_range_fails_validation() {
        let req: GeneratePredictions =
            serde_json::from_str(r#"{"forecast_days": 0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: GeneratePredictions =
            serde_json::from_str(r#"{"forecast_days": 366}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn market_basket_defaults() {
        let params: MarketBasketParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.min_support, 0.01);
        assert_eq!(params.min_confidence, 0.3);
        assert_eq!(params.min_lift, 1.0);
    }

    #[test]
    fn market_basket_thresholds_out_of_range_fail_validation() {
        let params: MarketBasketParams =
            serde_json::from_str(r#"{"min_support": 1.5}"#).unwrap();
        assert!(params.validate().is_err());

        let params: MarketBasketParams =
            serde_json::from_str(r#"{"min_confidence": 0.0}"#).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn model_type_tags_match_storage_values() {
        assert_eq!(ModelType::Arima.as_str(), "arima");
        assert_eq!(ModelType::Xgboost.as_str(), "xgboost");
        assert_eq!(ModelType::Ensemble.as_str(), "ensemble");
    }
}
