//! CLI argument parsing
//!
//! ```text
//! study-copilot [--data-dir DIR] [--config FILE] [-v...] [--log-file FILE] <command>
//!
//! COMMANDS:
//!   catalog    List classes, subjects and chapters
//!   generate   Generate study material for one chapter
//!   chat       Ask doubts about one chapter
//!   study      Interactive picker, then generate and chat
//!   admin      Manage reference uploads (passphrase required)
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use copilot_core::OutputKind;
use std::path::PathBuf;

/// CBSE study copilot
#[derive(Debug, Parser)]
#[command(name = "study-copilot")]
#[command(about = "NCERT-aligned study material and chapter chat for CBSE Classes 9-10", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (overrides $STUDY_COPILOT_HOME)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to <data-dir>/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Chapter selection shared by `generate` and `chat`
#[derive(Debug, Clone, ClapArgs)]
pub struct ChapterArgs {
    /// Class, e.g. "Class 9"
    #[arg(long = "class")]
    pub grade: String,

    #[arg(long)]
    pub subject: String,

    /// Chapter number, e.g. "1" or "H2"
    #[arg(long)]
    pub chapter: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List classes, subjects and chapters
    Catalog {
        #[arg(long = "class")]
        grade: Option<String>,

        #[arg(long)]
        subject: Option<String>,
    },

    /// Generate study material for one chapter
    Generate {
        #[command(flatten)]
        chapter: ChapterArgs,

        /// Sub-topic name or 1-based position (default: entire chapter)
        #[arg(long)]
        subtopic: Option<String>,

        /// summary, mind-map, revision-plan, mock-questions or explanation
        #[arg(long)]
        kind: Option<OutputKind>,

        /// Extra focus areas
        #[arg(long)]
        focus: Option<String>,

        /// Also write the unstyled result to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print without terminal styling
        #[arg(long)]
        plain: bool,
    },

    /// Ask doubts about one chapter (reads stdin, /quit to stop)
    Chat {
        #[command(flatten)]
        chapter: ChapterArgs,

        #[arg(long)]
        plain: bool,
    },

    /// Pick a chapter interactively, generate, then optionally chat
    Study {
        #[arg(long)]
        plain: bool,
    },

    /// Manage reference uploads
    Admin {
        #[arg(long)]
        passphrase: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// Store reference material for a chapter
    Ingest {
        #[arg(long = "class")]
        grade: String,

        #[arg(long)]
        subject: String,

        /// Chapter label, matched loosely against chapter names
        #[arg(long)]
        chapter: String,

        #[arg(long, default_value = "Notes")]
        content_type: String,

        /// Inline text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the content from a text file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List stored uploads
    List,

    /// Delete every upload
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("study-copilot").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_generate() {
        let cli = parse(&[
            "generate",
            "--class",
            "Class 9",
            "--subject",
            "Science",
            "--chapter",
            "1",
            "--kind",
            "mock-questions",
        ])
        .unwrap();

        match cli.command {
            Command::Generate { chapter, kind, subtopic, .. } => {
                assert_eq!(chapter.grade, "Class 9");
                assert_eq!(chapter.chapter, "1");
                assert_eq!(kind, Some(OutputKind::MockQuestions));
                assert_eq!(subtopic, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_bad_kind() {
        assert!(parse(&[
            "generate", "--class", "Class 9", "--subject", "Science", "--chapter", "1", "--kind",
            "poem"
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["catalog", "-vv", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_admin_ingest_requires_content() {
        assert!(parse(&[
            "admin", "--passphrase", "p", "ingest", "--class", "Class 9", "--subject", "Science",
            "--chapter", "Matter"
        ])
        .is_err());

        let cli = parse(&[
            "admin", "--passphrase", "p", "ingest", "--class", "Class 9", "--subject", "Science",
            "--chapter", "Matter", "--text", "notes",
        ])
        .unwrap();
        match cli.command {
            Command::Admin {
                action: AdminAction::Ingest { content_type, text, .. },
                ..
            } => {
                assert_eq!(content_type, "Notes");
                assert_eq!(text.as_deref(), Some("notes"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_admin_text_and_file_conflict() {
        assert!(parse(&[
            "admin", "--passphrase", "p", "ingest", "--class", "Class 9", "--subject", "Science",
            "--chapter", "Matter", "--text", "a", "--file", "b.txt",
        ])
        .is_err());
    }
}
