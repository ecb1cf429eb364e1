// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance baseline for the highlighter.
//!
//! Usage: `baseline [SCRIPT...]`. Without arguments the bundled sample
//! inputs are measured. Set `RUST_LOG=scriptlight=debug` for details.

use std::process::ExitCode;
use std::time::Instant;

use scriptlight::editor::{EditorConfig, EditorSession};
use scriptlight::error::read_script;
use scriptlight::syntax::performance::SAMPLE_SCRIPT;
use scriptlight::syntax::{run_baseline_test, sample_inputs};
use tracing_subscriber::EnvFilter;

const PASSES: usize = 5;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let inputs = match load_inputs() {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("=== Highlighter Performance Baseline ===");
    println!("Measuring {} inputs, {} passes each\n", inputs.len(), PASSES);

    let start_time = Instant::now();
    let measurement = run_baseline_test(&inputs, PASSES);
    println!("Baseline test completed in {:.2}s\n", start_time.elapsed().as_secs_f64());
    println!("{}", measurement.generate_report());

    println!("=== Replaying Keystrokes Through An Editor Session ===");
    replay_typing();

    let (meets_requirements, issues) = measurement.meets_requirements();
    if meets_requirements {
        println!("\nAll performance budgets met.");
        ExitCode::SUCCESS
    } else {
        println!("\nPerformance issues detected:");
        for issue in &issues {
            println!("  - {}", issue);
        }
        ExitCode::FAILURE
    }
}

fn load_inputs() -> scriptlight::Result<Vec<(String, String)>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Ok(sample_inputs());
    }
    paths
        .into_iter()
        .map(|path| read_script(&path).map(|source| (path, source)))
        .collect()
}

fn replay_typing() {
    let mut session = EditorSession::new(EditorConfig::new());
    let mut text = String::new();

    let start = Instant::now();
    for ch in SAMPLE_SCRIPT.chars() {
        text.push(ch);
        session.input(text.as_str());
    }
    let duration = start.elapsed();

    let metrics = session.service().metrics();
    println!(
        "  {} keystrokes in {}ms (avg {}us, max {}us per highlight)",
        SAMPLE_SCRIPT.chars().count(),
        duration.as_millis(),
        metrics.avg_time.as_micros(),
        metrics.max_time.as_micros()
    );
    println!("  {} lines in the final gutter", session.layer().line_numbers.lines().count());
}
