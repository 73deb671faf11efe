//! Startup loading of the model, metrics and feature-name artifacts.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::classifier::{Classifier, OnnxClassifier};
use crate::error::ArtifactError;
use crate::models::MetricsReport;

pub const MODEL_FILE: &str = "model.onnx";
pub const METRICS_FILE: &str = "metrics.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Everything the service serves from, loaded once and never mutated.
#[derive(Clone)]
pub struct Artifacts {
    pub classifier: Arc<dyn Classifier>,
    pub metrics: Arc<MetricsReport>,
    pub feature_names: Arc<Vec<String>>,
}

impl Artifacts {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        metrics: MetricsReport,
        feature_names: Vec<String>,
    ) -> Self {
        Self {
            classifier,
            metrics: Arc::new(metrics),
            feature_names: Arc::new(feature_names),
        }
    }

    /// Loads all three artifacts from `dir`. Any failure aborts startup.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let model_path = existing(dir.join(MODEL_FILE))?;
        let classifier = OnnxClassifier::load(&model_path)?;
        info!(path = %model_path.display(), "loaded classifier");

        let metrics = load_metrics(&dir.join(METRICS_FILE))?;
        let feature_names = load_feature_names(&dir.join(FEATURE_NAMES_FILE))?;

        Ok(Self::new(Arc::new(classifier), metrics, feature_names))
    }
}

pub fn load_metrics(path: &Path) -> Result<MetricsReport, ArtifactError> {
    let metrics: MetricsReport = read_json(path)?;
    if !metrics.is_consistent() {
        warn!(
            path = %path.display(),
            "per-class ROC sequences have mismatched lengths"
        );
    }
    info!(
        path = %path.display(),
        classes = metrics.class_count(),
        accuracy = metrics.accuracy,
        "loaded metrics"
    );
    Ok(metrics)
}

pub fn load_feature_names(path: &Path) -> Result<Vec<String>, ArtifactError> {
    let names: Vec<String> = read_json(path)?;
    info!(path = %path.display(), features = ?names, "loaded feature names");
    Ok(names)
}

fn existing(path: PathBuf) -> Result<PathBuf, ArtifactError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(ArtifactError::Missing(path))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let path = existing(path.to_path_buf())?;
    let raw = std::fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse { path, source })
}
