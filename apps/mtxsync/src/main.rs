//! Mtxsync CLI binary entry point.
//! Resolves effective settings, wires the API client and file I/O into the
//! sync engine, and prints results.

mod api;
mod cli;
mod config;
mod document;
mod normalize;
mod output;
mod sync;
mod utils;

use clap::Parser;
use cli::{Cli, CommonOpts, Commands};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Once { opts } => {
            let eff = resolve(&opts);
            let outcome = run_cycle(&eff);
            output::print_cycle(&outcome, &utils::rel_to_wd(&eff.config_path), None, &eff.output);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Check { opts } => {
            let eff = resolve(&opts);
            let client = api_client(&eff);
            let result = client.probe();
            let failed = result.is_err();
            output::print_check(&result, client.url(), &eff.output);
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Run { opts } => {
            let eff = resolve(&opts);
            let client = api_client(&eff);

            // Startup gate: refuse to enter the loop when the API is
            // unreachable or credentials are wrong.
            if let Err(e) = client.probe() {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    format!("initial connectivity check failed: {}", e)
                );
                std::process::exit(1);
            }

            let target = utils::rel_to_wd(&eff.config_path);
            let mut iteration: u64 = 0;
            loop {
                iteration += 1;
                let outcome = run_cycle(&eff);
                output::print_cycle(&outcome, &target, Some(iteration), &eff.output);
                std::thread::sleep(eff.interval);
            }
        }
    }
}

fn resolve(opts: &CommonOpts) -> config::Effective {
    let eff = config::resolve_effective(Path::new("."), &opts.to_overrides());
    if config::load_config(Path::new(".")).is_none() && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No mtxsync.{toml,yaml} found; using env/defaults."
        );
    }
    eff
}

fn api_client(eff: &config::Effective) -> api::ApiClient {
    api::ApiClient::new(
        eff.api_url.clone(),
        eff.username.clone(),
        eff.password.clone(),
    )
}

/// One full cycle against the resolved settings: the API client feeds the
/// engine, and the engine's only file access goes through the two helpers.
fn run_cycle(eff: &config::Effective) -> sync::SyncOutcome {
    let client = api_client(eff);
    let path = eff.config_path.clone();
    sync::run_once(
        || client.fetch_paths(),
        || sync::read_config_lines(&path),
        |lines| sync::write_config_lines(&path, lines),
    )
}
