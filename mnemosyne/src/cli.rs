use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::Config;
use crate::error::{MnemosyneError, Result};
use crate::models::{format_timestamp, IngestProfile, Memory};
use crate::services::{IngestRequest, IngestSummary, MemoryService};
use crate::store::validate_records;

#[derive(Parser, Debug)]
#[command(name = "mnemosyne")]
#[command(about = "Personal memory log that tracks how your beliefs change over time")]
pub struct Cli {
    /// JSON memory store. Overrides MNEMOSYNE_STORE.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract memories from text and append them to the store
    Ingest {
        #[arg(long)]
        text: String,
        /// Origin tag, e.g. note, chat, voice
        #[arg(long)]
        source: String,
        /// ISO 8601; defaults to now
        #[arg(long)]
        timestamp: Option<String>,
        /// default, journal or research
        #[arg(long)]
        profile: Option<IngestProfile>,
    },
    /// Answer a question from the stored memories, or from a
    /// `{"memories": [...], "question": "..."}` document with --input
    Answer {
        #[arg(long, required_unless_present = "input")]
        question: Option<String>,
        /// Path to the JSON document, or `-` for stdin. The store is not used.
        #[arg(long, conflicts_with = "question")]
        input: Option<PathBuf>,
    },
    /// Run a thinking session on one topic and record its summary
    Session {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Print the belief graph as JSON
    Graph,
    /// Print memories in time order as JSON
    Timeline {
        #[arg(long)]
        topic: Option<String>,
    },
    /// Copy the store into the snapshot directory
    Snapshot {
        /// Overrides MNEMOSYNE_SNAPSHOT_DIR
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Fold command-line overrides into the environment configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(store) = &self.store {
            config.store.path = store.clone();
        }
        if let Command::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

/// Run a one-shot command and return what should be printed.
///
/// `Serve` is handled by the binary and yields an empty string here.
pub fn run_command(command: &Command, service: &MemoryService) -> Result<String> {
    match command {
        Command::Ingest {
            text,
            source,
            timestamp,
            profile,
        } => {
            let summary = service.ingest(IngestRequest {
                text: text.clone(),
                source: source.clone(),
                timestamp: timestamp.clone(),
                profile: *profile,
            })?;
            Ok(format_ingest_summary(&summary))
        }
        Command::Answer {
            input: Some(input), ..
        } => {
            let (memories, question) = parse_answer_input(&read_input(input)?)?;
            Ok(service.answer_over(&memories, &question)?.answer)
        }
        Command::Answer { question, .. } => {
            Ok(service.answer(question.as_deref().unwrap_or_default())?.answer)
        }
        Command::Session { topic, start, end } => {
            let session = service.thinking_session(topic, start.as_deref(), end.as_deref())?;
            Ok(session.answer)
        }
        Command::Graph => Ok(serde_json::to_string_pretty(&service.graph(None))?),
        Command::Timeline { topic } => {
            let items = service.timeline(topic.as_deref());
            Ok(serde_json::to_string_pretty(&items)?)
        }
        Command::Snapshot { dir } => Ok(match service.snapshot(dir.as_deref())? {
            Some(path) => format!("Snapshot written to {}", path.display()),
            None => "Store is empty, no snapshot written.".to_string(),
        }),
        Command::Serve { .. } => Ok(String::new()),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Split an answer document into its memories and question.
///
/// Memory records go through the same validation as the file store, so
/// legacy field names are accepted and malformed records are skipped.
pub fn parse_answer_input(raw: &str) -> Result<(Vec<Memory>, String)> {
    let mut document: Value = serde_json::from_str(raw)?;
    let (Some(memories), Some(question)) = (
        document.get_mut("memories").map(Value::take),
        document.get_mut("question").map(Value::take),
    ) else {
        return Err(MnemosyneError::Validation(
            "Input must contain 'memories' and 'question' fields.".to_string(),
        ));
    };

    let Value::Array(records) = memories else {
        return Err(MnemosyneError::Validation(
            "'memories' must be a list of memory objects.".to_string(),
        ));
    };
    let Value::String(question) = question else {
        return Err(MnemosyneError::Validation(
            "'question' must be a string.".to_string(),
        ));
    };

    Ok((validate_records(records), question))
}

pub fn format_ingest_summary(summary: &IngestSummary) -> String {
    let mut lines = vec!["New memories:".to_string()];
    lines.extend(summary.new_memories.iter().map(|m| {
        format!(
            "{} {} {}",
            m.id,
            format_timestamp(&m.created_at),
            m.content
        )
    }));

    if !summary.revisions.is_empty() {
        lines.push("Revisions:".to_string());
        lines.extend(
            summary
                .revisions
                .iter()
                .map(|r| format!("{} revises {}", r.memory_id, r.revision_of)),
        );
    }

    if !summary.contradictions.is_empty() {
        lines.push("Contradictions:".to_string());
        lines.extend(
            summary
                .contradictions
                .iter()
                .map(|c| format!("Topic: {} status: {}", c.topic, c.status)),
        );
    }

    lines.push(format!(
        "Total memories in store: {}",
        summary.total_memories
    ));
    lines.join("\n")
}
