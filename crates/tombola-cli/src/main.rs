//! CLI binary for deterministic raffle drawing.
//!
//! # Usage
//!
//! ```bash
//! # Draw winners from an event file; writes <FILE>-results.json
//! tombola draw raffle.json
//!
//! # Write the result record somewhere specific
//! tombola draw raffle.json --output results/2024.json
//!
//! # Re-run a published draw and check that it reproduces
//! tombola verify raffle-results.json
//!
//! # Emit an example event file to start from
//! tombola example
//! ```
//!
//! Every failure (unreadable file, malformed JSON, invalid timestamp,
//! empty packet) prints a message on stderr and exits non-zero without
//! writing a result file.

use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tombola_core::report::{format_report, format_verify};
use tombola_core::{
    load_event, load_record, save_record, verify_record, Drawing, Event, Packet, Participant,
    ResultRecord,
};

#[derive(Parser)]
#[command(name = "tombola")]
#[command(about = "Deterministic, independently verifiable raffle drawing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw winners from an event JSON file.
    Draw {
        /// Path to the event JSON file.
        file: PathBuf,

        /// Where to write the result record (default: <FILE>-results.json).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-run a recorded draw and check that it reproduces.
    Verify {
        /// Path to a results JSON file produced by `draw`.
        file: PathBuf,
    },

    /// Write an example event JSON file.
    Example {
        /// Output path.
        #[arg(default_value = "example-raffle.json")]
        path: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Draw { file, output } => cmd_draw(&file, output),
        Commands::Verify { file } => cmd_verify(&file),
        Commands::Example { path } => cmd_example(&path),
    }
}

fn cmd_draw(file: &Path, output: Option<PathBuf>) {
    if let Err(message) = run_draw(file, output) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

/// Load, draw, print, save. Any failure returns before the result file is
/// created, so a failed draw leaves nothing behind.
fn run_draw(file: &Path, output: Option<PathBuf>) -> Result<(), String> {
    let event =
        load_event(file).map_err(|e| format!("cannot load {}: {}", file.display(), e))?;
    info!(
        "loaded {:?}: {} packets, {} participants",
        event.title,
        event.packets.len(),
        event.distinct_names().len()
    );

    let drawing = Drawing::new(&event).map_err(|e| e.to_string())?;
    let outcome = drawing.run().map_err(|e| e.to_string())?;

    // Execution time in the input timestamp's own offset, like the event
    // itself is written.
    let drawing_timestamp = Utc::now()
        .with_timezone(outcome.timestamp.offset())
        .to_rfc3339();
    let record = ResultRecord::assemble(&event, &outcome, drawing_timestamp);

    println!("{}", format_report(&record, outcome.epoch()));

    let output = output.unwrap_or_else(|| default_output_path(file));
    save_record(&record, &output)
        .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;
    println!("Results saved to {}", output.display());
    Ok(())
}

fn cmd_verify(file: &Path) {
    let record = match load_record(file) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Error: cannot load {}: {}", file.display(), e);
            process::exit(1);
        }
    };

    let report = match verify_record(&record) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print!("{}", format_verify(&report));
    if !report.is_clean() {
        process::exit(1);
    }
}

fn cmd_example(path: &Path) {
    let json = match serde_json::to_string_pretty(&example_event()) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = fs::write(path, json) {
        eprintln!("Error: cannot write {}: {}", path.display(), e);
        process::exit(1);
    }
    println!("Created {}", path.display());
}

/// `<input stem>-results.json` next to the input file.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "draw".to_string());
    input.with_file_name(format!("{}-results.json", stem))
}

fn example_event() -> Event {
    let participant = |name: &str, tickets: u32| Participant {
        name: name.to_string(),
        tickets,
    };
    Event {
        title: "Classic Computing Tombola 2024".to_string(),
        timestamp: "2024-03-20T15:00:00+01:00".to_string(),
        packets: vec![
            Packet {
                title: "Paket #1 SS2".to_string(),
                participants: vec![
                    participant("@obsd_guru", 1),
                    participant("@tuti", 2),
                    participant("@Cobalt60", 1),
                    participant("@gnupublic", 1),
                ],
            },
            Packet {
                title: "Paket #2 SS10".to_string(),
                participants: vec![
                    participant("@obsd_guru", 1),
                    participant("@tuti", 1),
                    participant("@Cobalt60", 1),
                    participant("@gnupublic", 1),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("events/raffle.json")),
            PathBuf::from("events/raffle-results.json")
        );
        assert_eq!(
            default_output_path(Path::new("raffle")),
            PathBuf::from("raffle-results.json")
        );
    }

    #[test]
    fn test_example_event_is_drawable() {
        let event = example_event();
        let outcome = Drawing::new(&event).unwrap().run().unwrap();
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_failed_draw_writes_no_result_file() {
        let dir = std::env::temp_dir();
        let input = dir.join("tombola-empty-packet.json");
        let output = dir.join("tombola-empty-packet-results.json");
        fs::write(
            &input,
            r#"{
                "title": "E",
                "timestamp": "2024-03-20T15:00:00+01:00",
                "packets": [
                    {"title": "P", "participants": [{"name": "a", "tickets": 0}]}
                ]
            }"#,
        )
        .unwrap();

        let result = run_draw(&input, Some(output.clone()));
        fs::remove_file(&input).unwrap();

        let message = result.unwrap_err();
        assert!(message.contains("no tickets"));
        assert!(!output.exists());
    }
}
