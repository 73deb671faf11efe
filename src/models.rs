use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ServiceError;

/// Number of measurements a prediction row carries.
pub const FEATURE_COUNT: usize = 4;

/// The three Iris species, indexed the way the classifier emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrisClass {
    Setosa,
    Versicolor,
    Virginica,
}

impl IrisClass {
    pub const ALL: [IrisClass; 3] = [
        IrisClass::Setosa,
        IrisClass::Versicolor,
        IrisClass::Virginica,
    ];

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(IrisClass::Setosa),
            1 => Some(IrisClass::Versicolor),
            2 => Some(IrisClass::Virginica),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IrisClass::Setosa => "Setosa",
            IrisClass::Versicolor => "Versicolor",
            IrisClass::Virginica => "Virginica",
        }
    }
}

impl fmt::Display for IrisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How strictly the service checks measurement ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputPolicy {
    /// Any finite number goes to the classifier untouched.
    #[default]
    Permissive,
    /// Negative measurements are rejected with 400.
    NonNegative,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl PredictionRequest {
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    fn named_values(&self) -> [(&'static str, f64); FEATURE_COUNT] {
        [
            ("sepal_length", self.sepal_length),
            ("sepal_width", self.sepal_width),
            ("petal_length", self.petal_length),
            ("petal_width", self.petal_width),
        ]
    }

    pub fn is_all_zero(&self) -> bool {
        self.named_values().iter().all(|(_, v)| *v == 0.0)
    }

    /// Checks the request against `policy` and lays it out in model order.
    pub fn to_feature_row(&self, policy: InputPolicy) -> Result<FeatureRow, ServiceError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ServiceError::InvalidInput(format!("{name} must be a finite number")));
            }
            if policy == InputPolicy::NonNegative && value < 0.0 {
                return Err(ServiceError::InvalidInput(format!("{name} must not be negative")));
            }
        }

        Ok(FeatureRow([
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]))
    }
}

/// One row of features in the order the model was trained on:
/// sepal length, sepal width, petal length, petal width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow(pub [f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// The row as a `[1, 4]` f32 matrix, the input shape of the exported graph.
    pub fn to_array(&self) -> ndarray::Array2<f32> {
        ndarray::Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.0[j] as f32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: IrisClass,
}

/// Evaluation summary written by the training step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub classification_report: String,
    pub roc_auc: Vec<f64>,
    pub fpr: Vec<Vec<f64>>,
    pub tpr: Vec<Vec<f64>>,
    /// Keys we don't model are passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetricsReport {
    pub fn class_count(&self) -> usize {
        self.roc_auc.len()
    }

    /// True when every per-class sequence has one entry per class and each
    /// curve has as many FPR points as TPR points.
    pub fn is_consistent(&self) -> bool {
        let n = self.roc_auc.len();
        self.fpr.len() == n
            && self.tpr.len() == n
            && self.fpr.iter().zip(&self.tpr).all(|(f, t)| f.len() == t.len())
    }

    /// `(fpr, tpr)` points of the ROC curve for `class`.
    pub fn roc_points(&self, class: usize) -> Vec<(f64, f64)> {
        match (self.fpr.get(class), self.tpr.get(class)) {
            (Some(fpr), Some(tpr)) => fpr.iter().copied().zip(tpr.iter().copied()).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
    pub classes: Vec<IrisClass>,
}
