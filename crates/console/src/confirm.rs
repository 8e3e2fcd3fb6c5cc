//! Yes/no confirmation and remark collection.
//!
//! Destructive and decision actions ask before any request is sent. The
//! controllers only see the [`Confirmer`] trait, so the CLI can prompt on a
//! terminal while tests answer up front.

use std::io::{self, BufRead, Write};

pub trait Confirmer: Send + Sync {
    /// Ask a yes/no question. `false` cancels the action.
    fn confirm(&self, prompt: &str) -> bool;

    /// Ask for a free-text remark, pre-filled with `default`. `None` cancels
    /// the action.
    fn collect_remarks(&self, prompt: &str, default: &str) -> Option<String>;
}

/// Prompts on stderr and reads answers from stdin.
///
/// `assume_yes` answers every confirmation without asking. A preset remark
/// skips the remarks prompt; with `assume_yes` and no preset the default
/// remark is used.
#[derive(Debug, Default, Clone)]
pub struct TerminalConfirmer {
    pub assume_yes: bool,
    pub preset_remarks: Option<String>,
}

impl TerminalConfirmer {
    pub fn new(assume_yes: bool, preset_remarks: Option<String>) -> Self {
        Self {
            assume_yes,
            preset_remarks: preset_remarks.filter(|r| !r.trim().is_empty()),
        }
    }

    fn read_line(prompt: &str) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{prompt} ");
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(&format!("{prompt} [y/N]"))
            .map(|answer| is_yes(&answer))
            .unwrap_or(false)
    }

    fn collect_remarks(&self, prompt: &str, default: &str) -> Option<String> {
        if let Some(preset) = &self.preset_remarks {
            return Some(preset.clone());
        }
        if self.assume_yes {
            return Some(default.to_string());
        }
        let answer = Self::read_line(&format!("{prompt} [{default}]"))?;
        Some(remark_or_default(&answer, default))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn remark_or_default(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_string(),
        text => text.to_string(),
    }
}
