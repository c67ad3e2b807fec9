//! Record a synthetic event stream to CSV.
//!
//! Usage: `cargo run -p lxe-bench --example record_synthetic [config.toml] [out.csv]`
//!
//! Without a config file the defaults are used (NaI, auto workers).
//! Set `RUST_LOG=lxe_engine=debug` to see per-batch logging.

use std::path::PathBuf;

use lxe_engine::{csv_sink, Run, RunConfig};
use tracing::info;

use lxe_bench::reference_stream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => RunConfig::from_toml_file(path)?,
        None => RunConfig::default(),
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .or_else(|| config.output_path.clone())
        .unwrap_or_else(|| PathBuf::from("lxe_steps.csv"));
    config.output_path = Some(output.clone());

    let sink = csv_sink(&config)?;
    let mut run = Run::begin(config, sink)?;
    for chunk in reference_stream(42).chunks(64) {
        run.process_events(chunk.to_vec())?;
    }
    let summary = run.end()?;

    info!(
        model = %summary.model,
        events = summary.events,
        rows = summary.sink.rows_written(),
        path = %output.display(),
        "wrote step table"
    );
    Ok(())
}
