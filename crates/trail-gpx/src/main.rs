use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use trail_gpx::{Settings, run};

fn main() -> ExitCode {
    let settings = Settings::from_cli();

    // Logs go to stderr, stdout may carry the document
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("trail-gpx {}", env!("CARGO_PKG_VERSION"));

    match run(&settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
