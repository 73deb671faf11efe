use clap::Parser;
use iris_backend::{artifacts::Artifacts, config::ServerArgs, server, telemetry};
use tracing::error;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = ServerArgs::parse();
    telemetry::init("iris_backend=info,actix_web=info");

    let artifacts = match Artifacts::load(&args.artifacts_dir) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("startup aborted: {e}");
            return Err(e.into());
        }
    };

    server::run(&args, artifacts).await?;
    Ok(())
}
