use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{PayError, Result};

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The platform clipboard, driven through the usual command-line helpers.
pub struct SystemClipboard;

#[cfg(target_os = "macos")]
const HELPERS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const HELPERS: &[(&str, &[&str])] = &[(
    "powershell",
    &[
        "-NoProfile",
        "-NonInteractive",
        "-Command",
        "$text = [Console]::In.ReadToEnd(); Set-Clipboard -Value $text",
    ],
)];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| PayError::Clipboard(format!("{program}: {e}")))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| PayError::Clipboard(format!("{program} stdin: {e}")))?;
    }
    let output = child
        .wait_with_output()
        .map_err(|e| PayError::Clipboard(format!("{program} wait: {e}")))?;
    if !output.status.success() {
        let err = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(PayError::Clipboard(format!("{program} failed: {err}")));
    }
    Ok(())
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut last_err = PayError::Clipboard("no clipboard helper available".into());
        for (program, args) in HELPERS {
            match pipe_to(program, args, text) {
                Ok(()) => {
                    debug!(helper = *program, "report copied");
                    return Ok(());
                }
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

/// Where the text ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    File(PathBuf),
}

/// Put `text` on the clipboard, or write it to `fallback` when the clipboard
/// cannot be reached.
pub fn copy_with_fallback(
    clipboard: &dyn Clipboard,
    text: &str,
    fallback: &Path,
) -> Result<CopyOutcome> {
    match clipboard.write_text(text) {
        Ok(()) => Ok(CopyOutcome::Clipboard),
        Err(e) => {
            warn!(error = %e, path = %fallback.display(), "clipboard unavailable, writing report file");
            if let Some(parent) = fallback.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(fallback, text)?;
            Ok(CopyOutcome::File(fallback.to_path_buf()))
        }
    }
}
