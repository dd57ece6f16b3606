// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use notestack::app_config::{self, Config};
use notestack::file_utils::FileManager;
use notestack::generation::{GenerationParams, QuestionMode};
use notestack::{build_filename, Controller, TextExtractor};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for QuestionMode to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliQuestionMode {
    Objective,
    Subjective,
}

impl From<CliQuestionMode> for QuestionMode {
    fn from(mode: CliQuestionMode) -> Self {
        match mode {
            CliQuestionMode::Objective => QuestionMode::Objective,
            CliQuestionMode::Subjective => QuestionMode::Subjective,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract plain text from a note, or from every note under a directory
    Extract {
        /// PDF/DOCX file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Summarize a note and print the JSON result
    Summarize {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Generate practice questions from a note and print the JSON result
    Questions {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Question style
        #[arg(long, value_enum, default_value = "objective")]
        mode: CliQuestionMode,

        /// Marks per question
        #[arg(long)]
        marks: Option<u32>,

        /// Number of questions
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Run the content safety check on a note
    Check {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Store a note in the upload folder under its policy filename
    Upload {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        department: String,

        #[arg(long)]
        enrollment_id: Option<String>,
    },

    /// Print the storage filename for a subject/department/enrollment triple
    Filename {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        enrollment_id: Option<String>,
    },

    /// Test the connection with the first configured model
    Ping,

    /// Generate shell completions for notestack
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// NoteStack - AI study aids for shared notes
///
/// Extracts text from uploaded PDF/DOCX notes and generates summaries,
/// practice questions and moderation verdicts with a hosted model.
#[derive(Parser, Debug)]
#[command(name = "notestack")]
#[command(version)]
#[command(about = "AI summaries and practice questions for study notes")]
#[command(long_about = "NoteStack extracts text from PDF/DOCX study notes and asks a hosted model for summaries and practice questions.

EXAMPLES:
    notestack extract notes.pdf                         # Print extracted text
    notestack extract uploads/                          # Extract every note in a folder
    notestack summarize notes.docx                      # Summary as JSON
    notestack questions notes.pdf --mode subjective --marks 5 --count 3
    notestack check notes.pdf                           # Content safety verdict
    notestack upload notes.pdf --subject 'Math 101' --department CS --enrollment-id E1
    notestack completions bash > notestack.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. The API key can also be supplied through
    the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// API key for the generative model service
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace-level logger; the effective level is lowered once config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "notestack", &mut std::io::stdout());
            Ok(())
        }
        Commands::Filename { subject, department, enrollment_id } => {
            println!(
                "{}",
                build_filename(subject.as_deref(), department.as_deref(), enrollment_id.as_deref())
            );
            Ok(())
        }
        Commands::Extract { path } => run_extract(&path),
        command => {
            let config = load_config(&cli.config_path, cli.api_key, cli.log_level)?;
            let controller = Controller::with_config(config)?;
            run_with_controller(&controller, command).await
        }
    }
}

fn load_config(path: &Path, api_key: Option<String>, cli_level: Option<CliLogLevel>) -> Result<Config> {
    let config = Config::load_or_create(path)?.with_api_key(api_key);

    // If log level was not set via command line, apply the configured one
    if cli_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    Ok(config)
}

async fn run_with_controller(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Summarize { path } => print_json(&controller.summarize(&path).await?),
        Commands::Questions { path, mode, marks, count } => {
            let params = GenerationParams::new(mode.into(), marks, count);
            print_json(&controller.generate_questions(&path, &params).await?)
        }
        Commands::Check { path } => print_json(&controller.check_safety(&path).await?),
        Commands::Upload { path, subject, department, enrollment_id } => {
            let stored = controller.store_upload(
                &path,
                Some(subject.as_str()),
                Some(department.as_str()),
                enrollment_id.as_deref(),
            )?;
            info!("File uploaded successfully!");
            print_json(&stored)
        }
        Commands::Ping => {
            controller.test_connection().await?;
            info!("Connection OK");
            Ok(())
        }
        other => Err(anyhow!("Command does not need a controller: {:?}", other)),
    }
}

fn run_extract(path: &Path) -> Result<()> {
    let extractor = TextExtractor::new();

    if path.is_file() {
        let text = extractor
            .extract(path)
            .ok_or_else(|| anyhow!("Could not extract text from {:?}", path))?;
        println!("{}", text);
        return Ok(());
    }

    if !path.is_dir() {
        return Err(anyhow!("Input path does not exist: {:?}", path));
    }

    let documents = FileManager::find_documents(path)?;
    if documents.is_empty() {
        warn!("No PDF or DOCX notes found in {:?}", path);
        return Ok(());
    }

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner} [{bar:40}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut extracted = 0usize;
    for document in &documents {
        progress.set_message(document.display().to_string());
        match extractor.extract(document) {
            Some(text) => {
                extracted += 1;
                progress.println(format!("{}: {} chars", document.display(), text.chars().count()));
            }
            None => error!("Failed to extract {:?}", document),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!("Finished extracting {}/{} notes", extracted, documents.len());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
