//! HTTP server assembly.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::info;

use crate::artifacts::Artifacts;
use crate::config::ServerArgs;
use crate::handlers::{self, AppState};

/// Open policy: any origin, method and header, credentials allowed.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

/// Binds and serves until shutdown.
pub async fn run(args: &ServerArgs, artifacts: Artifacts) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(artifacts, args.input_policy));
    info!(policy = ?args.input_policy, "input policy");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::new("%r %s %Dms"))
            .app_data(state.clone())
            .configure(handlers::configure)
    });
    if let Some(workers) = args.workers {
        server = server.workers(workers);
    }

    let server = server.bind((args.host.as_str(), args.port))?;
    for addr in server.addrs() {
        info!("Server running at http://{addr}");
    }
    server.run().await
}
