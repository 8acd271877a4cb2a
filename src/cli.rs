// src/cli.rs
use clap::{Parser, Subcommand};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::client::share::{decode_share_link, encode_share_link};
use crate::client::{HttpTransport, Orchestrator, RunInput, RunOutcome, Session, TerminalPrompter};
use crate::errors::{CodebookError, Result};
use crate::languages::LanguageTable;

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Parser, Debug)]
#[command(name = "codebook", version, about = "Online code notebook backed by Judge0")]
pub struct Cli {
    /// TOML file replacing the built-in language table
    #[arg(long, global = true)]
    pub languages_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the run proxy server (default)
    Serve,

    /// Run a source file through a CodeBook server
    Run {
        file: PathBuf,

        #[arg(short, long)]
        language: String,

        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,

        /// Static program input
        #[arg(long, conflicts_with = "stdin_file")]
        stdin: Option<String>,

        /// Read static program input from a file
        #[arg(long)]
        stdin_file: Option<PathBuf>,

        /// Prompt for extra input lines before running (Ctrl-D to finish)
        #[arg(short, long)]
        interactive: bool,
    },

    /// Write the starter code for a language
    New {
        language: String,

        /// Defaults to codebook-<language><ext> in the current directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print a link that carries the file's code
    Share {
        file: PathBuf,

        #[arg(short, long)]
        language: String,

        #[arg(long, default_value = DEFAULT_SERVER)]
        base_url: String,
    },

    /// Print (or save) the code carried by a share link
    OpenShare {
        link: String,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the supported languages
    Languages,
}

/// Runs a client-side command. `Ok(false)` means the command finished but
/// the user should see a failure exit status.
pub async fn execute(command: Command, languages_file: Option<&Path>) -> Result<bool> {
    let languages = LanguageTable::load(languages_file)?;

    match command {
        Command::Serve => Err(CodebookError::Config(
            "serve is handled by the server entry point".to_string(),
        )),
        Command::Run {
            file,
            language,
            server,
            stdin,
            stdin_file,
            interactive,
        } => {
            let code = std::fs::read_to_string(&file)?;
            let stdin = match (stdin, stdin_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => String::new(),
            };
            run_file(languages, &server, RunInput { language, code, stdin }, interactive).await
        }
        Command::New { language, out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(languages.save_file_name(&language)));
            write_boilerplate(&languages, &language, &path)?;
            Ok(true)
        }
        Command::Share {
            file,
            language,
            base_url,
        } => {
            let code = std::fs::read_to_string(&file)?;
            println!("{}", encode_share_link(&base_url, &language, &code)?);
            Ok(true)
        }
        Command::OpenShare { link, out } => {
            let shared = decode_share_link(&link)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &shared.code)?;
                    println!("💾 Saved {} code to {}", shared.language, path.display());
                }
                None => {
                    eprintln!("📄 {}", shared.language);
                    println!("{}", shared.code);
                }
            }
            Ok(true)
        }
        Command::Languages => {
            for lang in languages.iter() {
                let shim = if lang.shim.is_some() { "  (prompt shim)" } else { "" };
                println!("{:<12} id={:<3} {}{}", lang.name, lang.id, lang.extension, shim);
            }
            Ok(true)
        }
    }
}

async fn run_file(
    languages: LanguageTable,
    server: &str,
    input: RunInput,
    interactive: bool,
) -> Result<bool> {
    let transport = HttpTransport::new(Client::new(), server);
    let prompter = TerminalPrompter::new("Program is asking:");
    let orchestrator = Orchestrator::new(transport, prompter, Arc::new(languages))
        .with_prompt_text("Enter input line (Ctrl-D to finish):");
    let session = Session::new(interactive);

    eprintln!("⏳ Submitting {} code to {}...", input.language, server);
    let outcome = orchestrator.run(&session, input).await;

    if let Some(message) = outcome.message() {
        println!("{}", message);
    }
    Ok(matches!(outcome, RunOutcome::Completed(_)))
}

/// Creates or refreshes `path` with the language's boilerplate, leaving
/// files that hold the user's own code untouched.
fn write_boilerplate(languages: &LanguageTable, language: &str, path: &Path) -> Result<()> {
    if languages.get(language).is_none() {
        return Err(CodebookError::UnsupportedLanguage(language.to_string()));
    }

    let current = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    match languages.switch_buffer(&current, language) {
        Some(boilerplate) => {
            std::fs::write(path, boilerplate)?;
            println!("✅ {} boilerplate written to {}", language, path.display());
        }
        None => println!("ℹ️  {} already contains your code, leaving it alone", path.display()),
    }
    Ok(())
}
