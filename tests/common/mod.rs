#![allow(dead_code)]

use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use iris_backend::artifacts::Artifacts;
use iris_backend::classifier::Classifier;
use iris_backend::error::ClassifierError;
use iris_backend::models::{FeatureRow, MetricsReport};

/// Nearest class mean of the Iris training set; close enough to a real
/// model for the canonical samples.
pub struct NearestCentroid;

const CENTROIDS: [[f64; 4]; 3] = [
    [5.006, 3.428, 1.462, 0.246],
    [5.936, 2.770, 4.260, 1.326],
    [6.588, 2.974, 5.552, 2.026],
];

impl Classifier for NearestCentroid {
    fn predict(&self, row: &FeatureRow) -> Result<i64, ClassifierError> {
        let distance = |c: &[f64; 4]| -> f64 {
            c.iter()
                .zip(row.values())
                .map(|(a, b)| (a - b).powi(2))
                .sum()
        };
        let (index, _) = CENTROIDS
            .iter()
            .enumerate()
            .map(|(i, c)| (i, distance(c)))
            .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best });
        Ok(index as i64)
    }
}

/// Always returns the same index, valid or not.
pub struct FixedIndex(pub i64);

impl Classifier for FixedIndex {
    fn predict(&self, _row: &FeatureRow) -> Result<i64, ClassifierError> {
        Ok(self.0)
    }
}

pub struct Broken;

impl Classifier for Broken {
    fn predict(&self, _row: &FeatureRow) -> Result<i64, ClassifierError> {
        Err(ClassifierError::Inference("graph evaluation failed".into()))
    }
}

pub fn metrics_fixture() -> MetricsReport {
    serde_json::from_str(include_str!("../fixtures/metrics.json")).unwrap()
}

pub fn feature_names_fixture() -> Vec<String> {
    serde_json::from_str(include_str!("../fixtures/feature_names.json")).unwrap()
}

pub fn artifacts_with(classifier: impl Classifier + 'static) -> Artifacts {
    Artifacts::new(
        Arc::new(classifier),
        metrics_fixture(),
        feature_names_fixture(),
    )
}

/// A throwaway HTTP server on its own actix system thread. Every request
/// gets `status` and `body`; `hits` counts them.
pub struct StubServer {
    pub url: String,
    pub hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub fn start(status: StatusCode, body: &'static str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

        std::thread::spawn(move || {
            let system = actix_rt::System::new();
            let server = HttpServer::new(move || {
                let counter = counter.clone();
                App::new().default_service(web::to(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async move {
                        HttpResponse::build(status)
                            .content_type("application/json")
                            .body(body)
                    }
                }))
            })
            .workers(1)
            .bind(("127.0.0.1", 0))
            .unwrap();

            tx.send(server.addrs()[0]).unwrap();
            system.block_on(server.run()).unwrap();
        });

        let addr = rx.recv().unwrap();
        Self {
            url: format!("http://{addr}"),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
