//! Toy corn yield predictor.
//!
//! Applies fixed coefficients (base yield per soil quality, a variety
//! multiplier and a monthly seasonal offset) to produce an "ARIMA" and a
//! "regression" estimate in tons per hectare. There is no model behind the
//! numbers; the constants are the ones published on the information page.

pub mod format;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::PredictionError;

/// Regression estimates are this fraction of the seasonless ARIMA base.
const REGRESSION_FACTOR: f64 = 0.95;

/// Share of the seasonal offset carried into the monthly ARIMA projection.
const PROJECTION_SEASONALITY: f64 = 0.9;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const MONTHLY_VARIATION: [f64; 12] = [
    -0.2, -0.15, -0.1, 0.05, 0.15, 0.2, 0.15, 0.05, -0.05, -0.1, -0.15, -0.2,
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SoilQuality {
    Baik,
    #[default]
    Sedang,
    Kurang,
    Buruk,
}

impl SoilQuality {
    /// Base yield in tons per hectare.
    pub fn base_yield(self) -> f64 {
        match self {
            SoilQuality::Baik => 5.8,
            SoilQuality::Sedang => 5.75,
            SoilQuality::Kurang => 5.7,
            SoilQuality::Buruk => 5.5,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Variety {
    Lokal,
    #[default]
    Hibrida,
}

impl Variety {
    pub fn multiplier(self) -> f64 {
        match self {
            Variety::Lokal => 0.95,
            Variety::Hibrida => 1.05,
        }
    }
}

/// Harvest month, 1 (January) to 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarvestMonth(u8);

impl HarvestMonth {
    pub fn new(month: u8) -> Result<Self, PredictionError> {
        if (1..=12).contains(&month) {
            Ok(Self(month))
        } else {
            Err(PredictionError::InvalidMonth(month))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        MONTH_LABELS[self.index()]
    }

    /// Seasonal offset in tons per hectare.
    pub fn variation(self) -> f64 {
        MONTHLY_VARIATION[self.index()]
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl Default for HarvestMonth {
    fn default() -> Self {
        Self(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Model {
    #[strum(serialize = "ARIMA")]
    #[serde(rename = "ARIMA")]
    Arima,
    #[strum(serialize = "Regresi")]
    #[serde(rename = "Regresi")]
    Regression,
}

/// Confidence band in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceBand {
    pub low: f64,
    pub high: f64,
}

pub const ARIMA_CONFIDENCE: ConfidenceBand = ConfidenceBand { low: 85.0, high: 92.0 };
pub const REGRESSION_CONFIDENCE: ConfidenceBand = ConfidenceBand { low: 75.0, high: 82.0 };

/// Published error metrics of both models, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub mape: f64,
    pub r_squared: f64,
}

pub const ARIMA_METRICS: ModelMetrics = ModelMetrics { mape: 6.5, r_squared: 89.0 };
pub const REGRESSION_METRICS: ModelMetrics = ModelMetrics { mape: 10.2, r_squared: 78.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionInput {
    pub soil: SoilQuality,
    pub variety: Variety,
    pub month: HarvestMonth,
    /// Land area in hectares.
    pub area: f64,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            soil: SoilQuality::default(),
            variety: Variety::default(),
            month: HarvestMonth::default(),
            area: 1.0,
        }
    }
}

impl PredictionInput {
    pub fn new(
        soil: SoilQuality,
        variety: Variety,
        month: u8,
        area: f64,
    ) -> Result<Self, PredictionError> {
        if !area.is_finite() || area <= 0.0 {
            return Err(PredictionError::InvalidArea(area));
        }
        Ok(Self {
            soil,
            variety,
            month: HarvestMonth::new(month)?,
            area,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub input: PredictionInput,
    /// ARIMA estimate in tons per hectare.
    pub arima: f64,
    /// Regression estimate in tons per hectare.
    pub regression: f64,
    pub difference: f64,
    pub best_model: Model,
    /// Difference relative to the regression estimate, in percent.
    pub relative_gain: f64,
    /// ARIMA estimate over the whole land area, in tons.
    pub total_harvest: f64,
    pub arima_confidence: ConfidenceBand,
    pub regression_confidence: ConfidenceBand,
}

/// One month of the projected yield curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub month: &'static str,
    pub arima: f64,
    pub regression: f64,
}

pub fn predict(input: PredictionInput) -> Prediction {
    let base = input.soil.base_yield();
    let multiplier = input.variety.multiplier();

    let arima = (base + input.month.variation()) * multiplier;
    let regression = base * multiplier * REGRESSION_FACTOR;
    let difference = (arima - regression).abs();

    let best_model = if arima > regression {
        Model::Arima
    } else {
        Model::Regression
    };

    log::debug!(
        "Prediction for {}/{} month {}: arima={arima:.3} regression={regression:.3}",
        input.soil,
        input.variety,
        input.month.number()
    );

    Prediction {
        input,
        arima,
        regression,
        difference,
        best_model,
        relative_gain: difference / regression * 100.0,
        total_harvest: arima * input.area,
        arima_confidence: ARIMA_CONFIDENCE,
        regression_confidence: REGRESSION_CONFIDENCE,
    }
}

/// Month-by-month curve around a prediction: the ARIMA line follows the
/// seasonal offsets, the regression line stays flat.
pub fn monthly_projection(prediction: &Prediction) -> Vec<ProjectionPoint> {
    MONTH_LABELS
        .iter()
        .zip(MONTHLY_VARIATION)
        .map(|(&label, variation)| ProjectionPoint {
            month: label,
            arima: prediction.arima + variation * PROJECTION_SEASONALITY,
            regression: prediction.regression,
        })
        .collect()
}
