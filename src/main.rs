use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use json_typegen::cli::CommandLineInterface;

fn main() -> ExitCode {
    init_tracing();
    let cli = CommandLineInterface::load();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}: {error:#}", "error".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so generated source on stdout stays clean.
fn init_tracing() {
    // JSON_TYPEGEN_LOG is either a plain level ("debug") or a full filter spec
    let filter = match std::env::var("JSON_TYPEGEN_LOG") {
        Ok(level) if is_plain_level(&level) => format!("json_typegen={level}"),
        Ok(spec) => spec,
        Err(_) => "json_typegen=warn".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
