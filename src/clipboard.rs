use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// System clipboard capability.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by the first available command-line helper
/// (wl-copy on Wayland, xclip elsewhere).
pub struct CommandClipboard;

impl Clipboard for CommandClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        if let Ok(status) = Command::new("wl-copy").arg(text).status() {
            if status.success() {
                return Ok(());
            }
        }

        let mut child = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .context("Neither wl-copy nor xclip is available")?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .context("Failed to write to xclip")?;
        }
        let status = child.wait().context("xclip failed")?;
        if !status.success() {
            bail!("xclip exited with status {status}");
        }
        Ok(())
    }
}
