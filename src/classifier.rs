//! Inference backends.
//!
//! The service only needs "feature row in, class index out", so the model
//! sits behind [`Classifier`]. The shipped backend runs an ONNX graph with
//! tract; scikit-learn models must be exported with `zipmap=False` so the
//! first output is a plain `int64` label tensor.

use std::path::Path;
use tract_onnx::prelude::*;

use crate::error::{ArtifactError, ClassifierError};
use crate::models::{FeatureRow, FEATURE_COUNT};

/// Maps one feature row to a class index.
pub trait Classifier: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ClassifierError>;
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A classifier backed by an optimized tract plan, built once at startup.
pub struct OnnxClassifier {
    plan: OnnxPlan,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model_error = |e: TractError| ArtifactError::Model {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(model_error)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, FEATURE_COUNT)),
            )
            .map_err(model_error)?
            .into_optimized()
            .map_err(model_error)?
            .into_runnable()
            .map_err(model_error)?;

        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ClassifierError> {
        let input: Tensor = row.to_array().into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let output = outputs.first().ok_or(ClassifierError::EmptyOutput)?;

        match output.datum_type() {
            DatumType::I64 => {
                let labels = output
                    .to_array_view::<i64>()
                    .map_err(|e| ClassifierError::Inference(e.to_string()))?;
                labels.iter().next().copied().ok_or(ClassifierError::EmptyOutput)
            }
            // Score vectors: the class is the arg-max over the single row.
            DatumType::F32 => {
                let scores = output
                    .to_array_view::<f32>()
                    .map_err(|e| ClassifierError::Inference(e.to_string()))?;
                argmax(scores.iter().copied())
                    .map(|index| index as i64)
                    .ok_or(ClassifierError::EmptyOutput)
            }
            other => Err(ClassifierError::UnsupportedOutput(format!("{other:?}"))),
        }
    }
}

fn argmax(values: impl Iterator<Item = f32>) -> Option<usize> {
    values
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
