// src/client/collector.rs
//! Pseudo-interactive stdin: lines are gathered through a sequence of
//! prompts before the program runs, then fed to it as ordinary stdin.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stderr, Stdin};
use tokio::sync::Mutex;

pub const DEFAULT_PROMPT: &str = "Enter input line (Cancel to finish):";

/// Answer to a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Accepted(String),
    Cancelled,
}

/// Something that can ask the user for one line of text.
///
/// Implementations must not open a second prompt while one is pending; the
/// collector always awaits each answer before asking again.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask_once(&self, message: &str) -> PromptOutcome;
}

/// Asks repeatedly until the user cancels and returns every accepted line in
/// order, empty lines included.
pub async fn collect_lines<P>(prompter: &P, prompt_text: &str) -> Vec<String>
where
    P: Prompter + ?Sized,
{
    let mut lines = Vec::new();
    while let PromptOutcome::Accepted(line) = prompter.ask_once(prompt_text).await {
        log::debug!("Collected interactive line #{}", lines.len() + 1);
        lines.push(line);
    }
    lines
}

/// [`collect_lines`] joined with `\n`; `""` when nothing was accepted.
pub async fn collect_inputs<P>(prompter: &P, prompt_text: &str) -> String
where
    P: Prompter + ?Sized,
{
    collect_lines(prompter, prompt_text).await.join("\n")
}

/// Prompts on stderr and reads answers from stdin. Enter accepts the line,
/// end of input (Ctrl-D) cancels.
pub struct TerminalPrompter<R = Stdin, W = Stderr> {
    title: String,
    io: Mutex<(BufReader<R>, W)>,
}

impl TerminalPrompter {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_io(title, tokio::io::stdin(), tokio::io::stderr())
    }
}

impl<R, W> TerminalPrompter<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn with_io(title: impl Into<String>, reader: R, writer: W) -> Self {
        Self {
            title: title.into(),
            io: Mutex::new((BufReader::new(reader), writer)),
        }
    }
}

#[async_trait]
impl<R, W> Prompter for TerminalPrompter<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn ask_once(&self, message: &str) -> PromptOutcome {
        let mut io = self.io.lock().await;
        let (reader, writer) = &mut *io;

        let banner = format!("{} {}\n> ", self.title, message);
        if let Err(e) = writer.write_all(banner.as_bytes()).await {
            log::warn!("Could not show prompt: {}", e);
        }
        if let Err(e) = writer.flush().await {
            log::warn!("Could not flush prompt: {}", e);
        }

        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) => PromptOutcome::Cancelled,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                PromptOutcome::Accepted(line)
            }
            Err(e) => {
                log::warn!("Reading interactive input failed, finishing collection: {}", e);
                PromptOutcome::Cancelled
            }
        }
    }
}
