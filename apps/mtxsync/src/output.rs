//! Output rendering for sync cycles and connectivity checks.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! the written entries and a top-level summary.

use crate::sync::{FetchError, SyncOutcome};
use owo_colors::OwoColorize;
use serde_json::json;

/// Entries listed per cycle in human output before eliding the rest.
const HUMAN_ENTRY_PREVIEW: usize = 5;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print one cycle's outcome in the requested format.
pub fn print_cycle(outcome: &SyncOutcome, target: &str, iteration: Option<u64>, output: &str) {
    match output {
        "json" => print_cycle_json(outcome, target, iteration),
        _ => print_cycle_human(outcome, target, iteration, use_colors(output)),
    }
}

fn print_cycle_json(outcome: &SyncOutcome, target: &str, iteration: Option<u64>) {
    let out = match outcome {
        SyncOutcome::Succeeded { entries } => {
            let paths: Vec<_> = entries
                .iter()
                .map(|(name, source)| json!({"name": name, "source": source}))
                .collect();
            json!({
                "result": "success",
                "target": target,
                "iteration": iteration,
                "paths": paths,
                "summary": {"paths_written": entries.len()},
            })
        }
        SyncOutcome::Failed { reason, detail } => json!({
            "result": "failed",
            "target": target,
            "iteration": iteration,
            "reason": reason.as_str(),
            "detail": detail,
            "summary": {"paths_written": 0},
        }),
    };
    println!("{}", serde_json::to_string_pretty(&out).unwrap());
}

fn print_cycle_human(outcome: &SyncOutcome, target: &str, iteration: Option<u64>, color: bool) {
    let iter_tag = match iteration {
        Some(n) => format!(" [cycle {}]", n),
        None => String::new(),
    };
    match outcome {
        SyncOutcome::Succeeded { entries } => {
            let headline = format!("{} paths -> {}{}", entries.len(), target, iter_tag);
            if color {
                println!("{} {}", "📥 synced:".green().bold(), headline);
            } else {
                println!("📥 synced: {}", headline);
            }
            for (name, source) in entries.iter().take(HUMAN_ENTRY_PREVIEW) {
                println!("  - {}: {}", name, source);
            }
            if entries.len() > HUMAN_ENTRY_PREVIEW {
                println!("  … and {} more", entries.len() - HUMAN_ENTRY_PREVIEW);
            }
        }
        SyncOutcome::Failed { reason, detail } => {
            let msg = format!(
                "sync failed (reason={}){} — {}",
                reason.as_str(),
                iter_tag,
                detail
            );
            if color {
                eprintln!("{} {}", "✖ ⟦error⟧".red().bold(), msg);
            } else {
                eprintln!("✖ ⟦error⟧ {}", msg);
            }
        }
    }
}

/// Print the result of a connectivity probe.
pub fn print_check(result: &Result<(), FetchError>, url: &str, output: &str) {
    match output {
        "json" => {
            let out = match result {
                Ok(()) => json!({"result": "success", "url": url}),
                Err(e) => json!({"result": "failed", "url": url, "detail": e.to_string()}),
            };
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        _ => {
            let color = use_colors(output);
            match result {
                Ok(()) => {
                    if color {
                        println!("{} {}", "✓ reachable:".green().bold(), url);
                    } else {
                        println!("✓ reachable: {}", url);
                    }
                }
                Err(e) => {
                    if color {
                        eprintln!("{} {} — {}", "✖ ⟦error⟧".red().bold(), url, e);
                    } else {
                        eprintln!("✖ ⟦error⟧ {} — {}", url, e);
                    }
                }
            }
        }
    }
}
