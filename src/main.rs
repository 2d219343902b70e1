use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use toolhub::config::LOG_ENV;
use toolhub::{Config, Hub, ProgramInfo};

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with tool output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut argv = std::env::args();
    let program = ProgramInfo::from_invocation(argv.next().as_deref());
    let args: Vec<String> = argv.collect();

    let config = Config::load().with_context(|| {
        format!("Failed to load configuration from {}", Config::path().display())
    })?;

    let hub = Hub::new(program, config);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let code = hub.run(&args, &mut out, &mut err)?;
    out.flush()?;

    Ok(ExitCode::from(code))
}
