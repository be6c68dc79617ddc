//! Hybrid PV sizing entry point: CLI wiring, report output, optional export and API.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use hybrid_pv_sim::cli::Args;
use hybrid_pv_sim::io::export::export_csv;
use hybrid_pv_sim::runner::run_sizing;
use hybrid_pv_sim::telemetry::init_tracing;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let scenario = args.load_scenario()?;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let report = run_sizing(&scenario.to_parameters());

    if args.print_trace {
        for r in report.trace.records() {
            println!("{r}");
        }
        println!();
    }
    println!("{report}");

    if let Some(path) = &args.trace_out {
        export_csv(&report.trace, path)
            .with_context(|| format!("failed to write trace CSV to {}", path.display()))?;
        info!(path = %path.display(), "trace written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(hybrid_pv_sim::api::AppState { report });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(hybrid_pv_sim::api::serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
