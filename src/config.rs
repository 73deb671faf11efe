//! Command-line and environment configuration for both binaries.

use clap::Parser;
use std::path::PathBuf;

use crate::models::InputPolicy;

/// Serves the Iris classifier over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "iris-backend", version, about)]
pub struct ServerArgs {
    /// Address to bind to
    #[arg(long, env = "IRIS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "IRIS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Directory holding model.onnx, metrics.json and feature_names.json
    #[arg(long, env = "IRIS_ARTIFACTS_DIR", default_value = "server")]
    pub artifacts_dir: PathBuf,

    /// Range check applied to incoming measurements
    #[arg(long, env = "IRIS_INPUT_POLICY", value_enum, default_value_t = InputPolicy::Permissive)]
    pub input_policy: InputPolicy,

    /// Worker threads (actix default when unset)
    #[arg(long, env = "IRIS_WORKERS")]
    pub workers: Option<usize>,
}

/// Terminal dashboard for the Iris prediction service.
#[derive(Parser, Debug, Clone)]
#[command(name = "iris-dashboard", version, about)]
pub struct DashboardArgs {
    /// Base URL of the prediction service
    #[arg(long, env = "IRIS_API_URL", default_value = crate::client::DEFAULT_API_URL)]
    pub api_url: String,

    /// Write logs to this file; the terminal is taken by the UI
    #[arg(long, env = "IRIS_DASHBOARD_LOG")]
    pub log_file: Option<PathBuf>,
}
