//! Blocking HTTP client for the prediction service.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{IrisClass, MetricsReport, PredictionRequest, PredictionResponse};

/// Default service URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Why a call to the service did not yield a value.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The request never completed (refused, DNS, timeout, ...).
    #[error("Could not connect to the API: {0}")]
    Connection(#[from] reqwest::Error),

    /// The service answered 2xx with a body we could not read.
    #[error("Invalid response from the API: {0}")]
    Decode(String),
}

/// Prediction service client. Calls block until the response arrives.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for `url`, keeping reqwest's default timeout.
    pub fn new(url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: Client::builder().build()?,
        })
    }

    /// Get the base URL
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// POST /predict/
    pub fn predict(&self, request: &PredictionRequest) -> Result<IrisClass, ApiError> {
        let url = format!("{}/predict/", self.base_url);
        let response = self.client.post(&url).json(request).send()?;
        let body: PredictionResponse = read_json(response)?;
        Ok(body.prediction)
    }

    /// GET /metrics/
    pub fn metrics(&self) -> Result<MetricsReport, ApiError> {
        let url = format!("{}/metrics/", self.base_url);
        let response = self.client.get(&url).send()?;
        read_json(response)
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
