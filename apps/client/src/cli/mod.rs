//! Command-line front end. Each subcommand mirrors one page action.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::gateway::ExportKind;
use crate::models::analysis::{DEFAULT_COVER_LETTER_TONE, DEFAULT_TIMELINE_WEEKS};
use crate::models::jobs::{JobId, DEFAULT_STATUS};
use crate::models::practice::{Difficulty, PracticeMode};

pub mod commands;
pub mod render;

#[derive(Debug, Parser)]
#[command(name = "client", version, about = "Command-line client for the PathToOffer backend")]
pub struct Cli {
    /// Backend base URL. Overrides API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage saved job postings.
    #[command(subcommand)]
    Jobs(JobsCommand),

    /// Upload and inspect resumes.
    #[command(subcommand)]
    Resume(ResumeCommand),

    /// JD analysis and fit scoring.
    #[command(subcommand)]
    Analysis(AnalysisCommand),

    /// Generate a cover letter for a job.
    CoverLetter {
        job_id: JobId,
        #[arg(long, default_value = DEFAULT_COVER_LETTER_TONE)]
        tone: String,
    },

    /// Read or edit the user profile.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Load or remove the demo job and resume.
    #[command(subcommand)]
    Demo(DemoCommand),

    /// Download a PDF or ZIP export for a job.
    Export {
        #[arg(value_enum)]
        kind: ExportArg,
        job_id: JobId,
        /// Directory to save into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Learning roadmap for a job.
    #[command(subcommand)]
    Roadmap(RoadmapCommand),

    /// Interview and coding practice.
    #[command(subcommand)]
    Practice(PracticeCommand),
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    List,
    Get {
        id: JobId,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        link: Option<String>,
        /// File holding the job description text.
        #[arg(long)]
        jd_file: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_STATUS)]
        status: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Update {
        id: JobId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        jd_file: Option<PathBuf>,
        #[arg(long)]
        status: Option<String>,
        /// Replaces the tag list when given.
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },
    Delete {
        id: JobId,
    },
    /// Delete every job, demo included.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ResumeCommand {
    Upload {
        path: PathBuf,
    },
    Latest,
    Demo,
    /// Remove every stored resume, demo included.
    Clear,
    Versions {
        job_id: JobId,
    },
    Optimize {
        job_id: JobId,
        #[arg(long)]
        label: Option<String>,
    },
    /// Print the URL that renders the resume in a browser.
    ViewUrl {
        #[arg(long)]
        demo: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalysisCommand {
    /// Analyze the job description. Uses the stored JD unless a file is given.
    Jd {
        job_id: JobId,
        #[arg(long)]
        jd_file: Option<PathBuf>,
    },
    Score {
        job_id: JobId,
    },
    Get {
        job_id: JobId,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Get,
    /// Set profile fields, e.g. `email=ada@example.com`.
    Set {
        #[arg(value_parser = parse_key_val, required = true)]
        fields: Vec<(String, String)>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DemoCommand {
    Load,
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum RoadmapCommand {
    Get {
        job_id: JobId,
    },
    Generate {
        job_id: JobId,
        #[arg(long, default_value_t = DEFAULT_TIMELINE_WEEKS)]
        weeks: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum PracticeCommand {
    Question {
        job_id: JobId,
        #[arg(long, value_enum, ignore_case = true, default_value = "behavioural")]
        mode: PracticeMode,
        /// Questions already asked, so the next one differs.
        #[arg(long = "previous")]
        previous: Vec<String>,
    },
    Score {
        job_id: JobId,
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
    },
    Sessions,
    CodingProblem {
        job_id: JobId,
        #[arg(long, value_enum, ignore_case = true, default_value = "medium")]
        difficulty: Difficulty,
    },
    CodingReview {
        job_id: JobId,
        /// JSON file with the problem returned by `coding-problem`.
        #[arg(long)]
        problem_file: PathBuf,
        #[arg(long)]
        code_file: PathBuf,
        /// Optional JSON file with local test results.
        #[arg(long)]
        results_file: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportArg {
    Resume,
    CoverLetter,
    InterviewPack,
    Package,
}

impl From<ExportArg> for ExportKind {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Resume => ExportKind::Resume,
            ExportArg::CoverLetter => ExportKind::CoverLetter,
            ExportArg::InterviewPack => ExportKind::InterviewPack,
            ExportArg::Package => ExportKind::Package,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export_with_global_flags() {
        let cli = Cli::try_parse_from([
            "client",
            "export",
            "interview-pack",
            "12",
            "--out",
            "/tmp",
            "--yes",
        ])
        .unwrap();
        assert!(cli.yes);
        match cli.command {
            Command::Export { kind, job_id, out } => {
                assert!(matches!(kind, ExportArg::InterviewPack));
                assert_eq!(job_id, 12);
                assert_eq!(out, PathBuf::from("/tmp"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_practice_defaults() {
        let cli = Cli::try_parse_from(["client", "practice", "question", "3"]).unwrap();
        match cli.command {
            Command::Practice(PracticeCommand::Question { mode, previous, .. }) => {
                assert_eq!(mode, PracticeMode::Behavioural);
                assert!(previous.is_empty());
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "client",
            "practice",
            "coding-problem",
            "3",
            "--difficulty",
            "Hard",
        ])
        .unwrap();
        match cli.command {
            Command::Practice(PracticeCommand::CodingProblem { difficulty, .. }) => {
                assert_eq!(difficulty, Difficulty::Hard);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli =
            Cli::try_parse_from(["client", "practice", "question", "3", "--mode", "behavioral"])
                .unwrap();
        match cli.command {
            Command::Practice(PracticeCommand::Question { mode, .. }) => {
                assert_eq!(mode, PracticeMode::Behavioural);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_settings_set_parses_pairs() {
        let cli = Cli::try_parse_from([
            "client",
            "settings",
            "set",
            "name=Ada Lovelace",
            "github_url=https://github.com/ada",
        ])
        .unwrap();
        match cli.command {
            Command::Settings(SettingsCommand::Set { fields }) => {
                assert_eq!(fields[0], ("name".to_string(), "Ada Lovelace".to_string()));
                assert_eq!(fields[1].1, "https://github.com/ada");
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["client", "settings", "set", "novalue"]).is_err());
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_val("=x").is_err());
    }
}
