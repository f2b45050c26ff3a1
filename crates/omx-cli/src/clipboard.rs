//! Clipboard access through the platform's clipboard command.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use omx_core::{ClipboardError, ClipboardPort};
use tracing::debug;

/// Candidate commands, tried in order. The first one found on `PATH` wins.
#[cfg(target_os = "macos")]
const CANDIDATES: &[&[&str]] = &[&["pbcopy"]];
#[cfg(target_os = "windows")]
const CANDIDATES: &[&[&str]] = &[&["clip"]];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// Writes to the clipboard by piping text into a platform command.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<Vec<String>>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::with_candidates(CANDIDATES.iter().map(|c| c.to_vec()))
    }
}

impl CommandClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit list of `[program, args...]` commands.
    pub fn with_candidates<I, C, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates
                .into_iter()
                .map(|c| c.into_iter().map(Into::into).collect::<Vec<String>>())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    fn locate(&self) -> Option<(PathBuf, &[String])> {
        self.candidates.iter().find_map(|command| {
            let (program, args) = command.split_first()?;
            which::which(program).ok().map(|path| (path, args))
        })
    }
}

impl ClipboardPort for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let (program, args) = self.locate().ok_or(ClipboardError::Unavailable)?;
        debug!(program = %program.display(), "Copying to clipboard");

        let mut child = Command::new(&program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        }

        let status = child
            .wait()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed(format!(
                "{} exited with {status}",
                program.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_is_unavailable() {
        let clipboard = CommandClipboard::with_candidates([["omx-no-such-clipboard-tool"]]);
        assert_eq!(clipboard.write_text("x"), Err(ClipboardError::Unavailable));
    }

    #[test]
    fn test_empty_candidates_are_skipped() {
        let clipboard = CommandClipboard::with_candidates(Vec::<Vec<String>>::new());
        assert_eq!(clipboard.write_text("x"), Err(ClipboardError::Unavailable));
    }

    #[cfg(unix)]
    #[test]
    fn test_text_is_piped_to_command() {
        let clipboard = CommandClipboard::with_candidates([["cat"]]);
        assert_eq!(clipboard.write_text("hello"), Ok(()));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_reported() {
        let clipboard = CommandClipboard::with_candidates([["false"]]);
        assert!(matches!(
            clipboard.write_text("hello"),
            Err(ClipboardError::WriteFailed(_))
        ));
    }
}
