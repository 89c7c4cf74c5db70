use std::io::{self, IsTerminal};
use std::process::ExitCode;

use ruler_mcp::{Server, PROTOCOL_VERSION, SERVER_VERSION};
use ruler_units::UNITS;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries the protocol, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Ruler MCP Server started");
    info!(stdin_is_terminal = io::stdin().is_terminal(), "units: {}", UNITS.labels().join(", "));

    let server = Server::new(&UNITS);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    info!("server ready, waiting for requests...");
    let outcome = server.run(stdin.lock(), &mut stdout);
    info!("server shutting down");

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("i/o error: {}", e);
            ExitCode::FAILURE
        }
    }
}
