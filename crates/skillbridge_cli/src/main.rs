//! CLI entry point for SkillBridge.

mod cli;
mod commands;
mod output;

use std::path::Path;

use clap::Parser;
use skillbridge_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load environment files. Order: 1) ~/.skillbridge/env  2) nearest project `.env`.
/// Variables already set in the process environment win over both.
fn load_skillbridge_env() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".skillbridge").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(env_file) = find_upwards(&cwd, ".env") {
            let _ = dotenvy::from_path(&env_file);
        }
    }
}

/// Walk from `start` toward the filesystem root looking for `name`.
fn find_upwards(start: &Path, name: &str) -> Option<std::path::PathBuf> {
    let mut dir = start.to_path_buf();
    for _ in 0..32 {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?.to_path_buf();
    }
    None
}

const VERBOSE_FILTER: &str =
    "warn,skillbridge=debug,skillbridge_core=debug,skillbridge_client=debug";

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if verbose {
        config = config.with_log_level(VERBOSE_FILTER);
    }
    if let Err(e) = skillbridge_observability::init(config) {
        output::warning(&format!("Logging disabled: {}", e));
    }
}

#[tokio::main]
async fn main() {
    load_skillbridge_env();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    if let Err(e) = commands::handle(cli).await {
        if e.downcast_ref::<commands::Reported>().is_none() {
            output::error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }
}
