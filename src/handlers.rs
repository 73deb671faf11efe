use actix_web::{error::InternalError, web, HttpRequest, HttpResponse, Result};
use tracing::debug;

use crate::artifacts::Artifacts;
use crate::error::{ClassifierError, ServiceError};
use crate::models::{
    ErrorBody, HealthResponse, InputPolicy, IrisClass, PredictionRequest, PredictionResponse,
};

/// Shared, read-only state handed to every worker.
pub struct AppState {
    pub artifacts: Artifacts,
    pub input_policy: InputPolicy,
}

impl AppState {
    pub fn new(artifacts: Artifacts, input_policy: InputPolicy) -> Self {
        Self {
            artifacts,
            input_policy,
        }
    }
}

/// Registers the routes and the JSON body rules. `web::Data<AppState>`
/// must be added to the app separately. `/predict` and `/metrics` answer
/// with or without the trailing slash.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(web::resource(["/predict/", "/predict"]).route(web::post().to(predict)))
        .service(web::resource(["/metrics/", "/metrics"]).route(web::get().to(get_metrics)))
        .service(web::resource("/health").route(web::get().to(health)));
}

/// Malformed bodies get the same `{"error": ...}` shape as other 400s.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let body = ErrorBody {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<PredictionRequest>,
) -> Result<HttpResponse, ServiceError> {
    let row = body.into_inner().to_feature_row(state.input_policy)?;

    let classifier = state.artifacts.classifier.clone();
    let index = web::block(move || classifier.predict(&row))
        .await
        .map_err(|_| ServiceError::Cancelled)??;

    let prediction = IrisClass::from_index(index).ok_or(ClassifierError::UnknownClass(index))?;
    debug!(%prediction, "prediction served");

    Ok(HttpResponse::Ok().json(PredictionResponse { prediction }))
}

pub async fn get_metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.artifacts.metrics.as_ref())
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: state.artifacts.feature_names.as_ref().clone(),
        classes: IrisClass::ALL.to_vec(),
    })
}
