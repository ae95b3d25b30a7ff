//! # calcline Main Entry Point

use anyhow::Result;
use calcline::{cmd_args::CommandLineArgs, AppController};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Dependency targets that only log at warn and above
const QUIET_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "tokio",
    "tokio_util",
    "tokio_rustls",
    "rustls",
    "tracing",
    "tracing_subscriber",
];

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let cmd_args = CommandLineArgs::parse();
    let mut app = AppController::new(cmd_args)?;

    println!("calcline - type an expression and press Enter");
    println!("Commands: :press <label>, :back, :clear, :theme [light|dark], :q");

    app.run().await
}

fn init_tracing_subscriber() {
    let mut filter = EnvFilter::from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ));
    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{target}=warn").parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
