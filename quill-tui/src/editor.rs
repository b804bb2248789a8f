//! External editor integration

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Resolve the editor command from config or environment
pub fn resolve_editor_command(config_command: &str) -> String {
    if config_command != "$EDITOR" {
        return config_command.to_string();
    }

    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| {
            ["nvim", "vim"]
                .into_iter()
                .find(|candidate| which(candidate))
                .unwrap_or("nano")
                .to_string()
        })
}

/// Check if a command exists in PATH
fn which(command: &str) -> bool {
    Command::new("which")
        .arg(command)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Substitute `{file}` in one editor argument
pub fn expand_template(template: &str, file_path: &Path) -> String {
    template.replace("{file}", &file_path.to_string_lossy())
}

/// Run the editor on a chapter and wait for it to exit.
///
/// The caller must hand the terminal back (leave raw mode) before calling.
pub fn launch_editor(command: &str, args: &[String], file_path: &Path) -> Result<()> {
    let expanded_args: Vec<String> = args
        .iter()
        .map(|arg| expand_template(arg, file_path))
        .collect();

    log::debug!("launching editor {} {:?}", command, expanded_args);

    let status = Command::new(command)
        .args(&expanded_args)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", command))?;

    if !status.success() {
        anyhow::bail!("Editor exited with status: {}", status);
    }

    Ok(())
}
