use std::io;

use clap::Parser;
use shashki::draughts::position::Position;
use shashki::Engine;
use tracing_subscriber::EnvFilter;

/// Russian draughts rules engine speaking a line-based text protocol over
/// stdin/stdout.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Position to start from instead of the starting one.
    #[arg(long, allow_hyphen_values = true)]
    position: Option<String>,
    /// Logging filter (e.g. "debug" or "shashki=trace"), `RUST_LOG` takes
    /// precedence. Logs are written to stderr.
    #[arg(long, default_value = "warn")]
    log: String,
    /// Do not print the engine and build information on startup.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if !config.quiet {
        shashki::print_engine_info();
        shashki::print_binary_info();
    }

    let position = match config.position.as_deref() {
        Some(encoding) => Position::try_from(encoding)?,
        None => Position::starting(),
    };
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Engine::with_position(position, &mut input, &mut output).run()
}
