//! Text style audit command line
//!
//! Runs extraction, sample boards and style selection against a JSON
//! document snapshot.
//!
//! Usage:
//!   textstyle-audit extract design.json --pretty
//!   textstyle-audit board design.json --strict
//!   textstyle-audit select design.json S:abc123
//!   textstyle-audit session design.json < requests.ndjson

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use textstyle_audit::host::{DocumentSnapshot, MemoryCanvas};
use textstyle_audit::protocol::{Session, SessionState, UiEvent};
use textstyle_audit::walker::{NoProgress, Progress, ProgressObserver};
use textstyle_audit::{
    select_nodes_with_style, BoardLayout, ExtractionConfig, SampleBoardBuilder, SelectionOutcome,
    StyleExtractor,
};

#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the ranked library text styles as JSON
    Extract {
        /// Path to the document snapshot
        snapshot: PathBuf,

        /// Use the strict ruleset (extended sizes, display/subheading excluded)
        #[arg(long)]
        strict: bool,

        /// Pretty print output
        #[arg(short, long)]
        pretty: bool,

        /// Output file path. If omitted, writes to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report fields that differ between nodes sharing a style
        #[arg(long)]
        check_consistency: bool,

        /// Print page progress to stderr
        #[arg(long)]
        progress: bool,
    },
    /// Build a sample board for the extracted styles on an in-memory canvas
    Board {
        /// Path to the document snapshot
        snapshot: PathBuf,

        /// Use the strict ruleset
        #[arg(long)]
        strict: bool,
    },
    /// Select every text node that uses a style
    Select {
        /// Path to the document snapshot
        snapshot: PathBuf,

        /// Style identifier
        style_id: String,
    },
    /// Answer newline-delimited JSON requests from stdin
    Session {
        /// Path to the document snapshot
        snapshot: PathBuf,
    },
}

/// Prints page progress lines to stderr.
struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn started(&mut self, total: usize) {
        eprintln!("Scanning {} pages", total);
    }

    fn unit(&mut self, progress: &Progress<'_>) {
        eprintln!("[{}/{}] {}", progress.current, progress.total, progress.unit_name);
    }
}

fn config_for(strict: bool) -> ExtractionConfig {
    if strict {
        ExtractionConfig::strict()
    } else {
        ExtractionConfig::new()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Extract {
            snapshot,
            strict,
            pretty,
            output,
            check_consistency,
            progress,
        } => {
            let document = DocumentSnapshot::open(&snapshot)?;
            let config = config_for(strict).with_consistency_check(check_consistency);
            let extractor = StyleExtractor::new(config);

            let report = if progress {
                extractor.extract(&document, &mut StderrProgress)?
            } else {
                extractor.extract(&document, &mut NoProgress)?
            };

            for divergence in &report.divergences {
                eprintln!(
                    "{}: {} differs on node {} ({} vs {})",
                    divergence.style_id,
                    divergence.field,
                    divergence.node_id,
                    divergence.first,
                    divergence.other
                );
            }

            let json = if pretty {
                serde_json::to_string_pretty(&report.styles)?
            } else {
                serde_json::to_string(&report.styles)?
            };

            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    eprintln!("Wrote {} styles to {}", report.styles.len(), path.display());
                },
                None => println!("{}", json),
            }
        },
        Command::Board { snapshot, strict } => {
            let document = DocumentSnapshot::open(&snapshot)?;
            let styles = StyleExtractor::new(config_for(strict))
                .extract(&document, &mut NoProgress)?
                .styles;

            let mut canvas = MemoryCanvas::new();
            let report =
                SampleBoardBuilder::new(BoardLayout::default()).build(&mut canvas, &styles)?;
            for sample in canvas.text_children(&report.frame) {
                println!("{}", sample.characters);
            }
            eprintln!(
                "Created frame with {} text styles ({} plain fallbacks)",
                report.created(),
                report.fallbacks()
            );
        },
        Command::Select { snapshot, style_id } => {
            let document = DocumentSnapshot::open(&snapshot)?;
            let mut canvas = MemoryCanvas::new();
            match select_nodes_with_style(&document, &mut canvas, &style_id)? {
                SelectionOutcome::Selected(nodes) => {
                    println!("Selected {} nodes using this style", nodes.len());
                    for node in nodes {
                        println!("  {}", node);
                    }
                },
                SelectionOutcome::NoMatch => println!("No nodes use this style"),
            }
        },
        Command::Session { snapshot } => {
            let document = DocumentSnapshot::open(&snapshot)?;
            let mut session = Session::new(document, MemoryCanvas::new());
            run_session(&mut session)?;
        },
    }

    Ok(())
}

fn run_session(session: &mut Session<DocumentSnapshot, MemoryCanvas>) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;
    let mut seen_notifications = 0;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut emit = |event: UiEvent| {
            if write_error.is_some() {
                return;
            }
            let written = serde_json::to_string(&event)
                .map_err(io::Error::from)
                .and_then(|json| writeln!(out, "{}", json));
            if let Err(e) = written {
                write_error = Some(e);
            }
        };

        let state = match session.handle_json(&line, &mut emit) {
            Ok(state) => state,
            Err(e) => {
                emit(UiEvent::Error {
                    message: format!("Invalid request: {}", e),
                });
                session.state()
            },
        };

        if let Some(e) = write_error.take() {
            return Err(e);
        }

        let notifications = session.canvas().notifications();
        for message in &notifications[seen_notifications..] {
            eprintln!("{}", message);
        }
        seen_notifications = notifications.len();

        if state == SessionState::Closed {
            break;
        }
    }

    out.flush()
}
