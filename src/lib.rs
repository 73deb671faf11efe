//! Iris species prediction: an HTTP service around a pre-trained classifier
//! and a terminal dashboard that talks to it.

pub mod artifacts;
pub mod classifier;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod telemetry;
