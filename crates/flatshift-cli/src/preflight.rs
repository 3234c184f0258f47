use std::io::IsTerminal;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};

const TERMINAL_CANDIDATES: &[(&str, &str)] = &[
    ("x-terminal-emulator", "-e"),
    ("gnome-terminal", "--"),
    ("konsole", "-e"),
    ("xfce4-terminal", "-x"),
    ("xterm", "-e"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalSession {
    Interactive,
    Relaunched,
}

pub fn ensure_interactive_terminal() -> Result<TerminalSession> {
    if std::io::stdout().is_terminal() {
        return Ok(TerminalSession::Interactive);
    }

    if !display_session_present() {
        return Err(anyhow!(
            "no interactive terminal and no display session; run flatshift from a terminal"
        ));
    }

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let current_exe = std::env::current_exe()
        .context("failed to resolve current executable for terminal relaunch")?;
    let Some(mut command) = build_relaunch_command(&current_exe, &args, command_available) else {
        return Err(anyhow!(
            "no usable terminal emulator found; install one of: {}",
            terminal_candidate_names().join(", ")
        ));
    };
    command
        .spawn()
        .context("failed to relaunch inside a terminal emulator")?;
    Ok(TerminalSession::Relaunched)
}

pub fn ensure_root() -> Result<()> {
    ensure_root_with_uid(current_uid()?)
}

pub(crate) fn ensure_root_with_uid(uid: u32) -> Result<()> {
    if uid == 0 {
        return Ok(());
    }
    Err(anyhow!(
        "package migration requires root privileges; re-run with sudo"
    ))
}

pub(crate) fn build_relaunch_command<Available>(
    current_exe: &Path,
    args: &[String],
    mut available: Available,
) -> Option<Command>
where
    Available: FnMut(&str) -> bool,
{
    for (terminal, exec_flag) in TERMINAL_CANDIDATES {
        if !available(terminal) {
            continue;
        }
        let mut command = Command::new(terminal);
        command.arg(exec_flag).arg(current_exe);
        command.args(args);
        return Some(command);
    }
    None
}

pub(crate) fn terminal_candidate_names() -> Vec<&'static str> {
    TERMINAL_CANDIDATES.iter().map(|(name, _)| *name).collect()
}

fn display_session_present() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

fn command_available(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn current_uid() -> Result<u32> {
    let output = Command::new("id")
        .arg("-u")
        .output()
        .context("failed to query current user id")?;
    if !output.status.success() {
        return Err(anyhow!("failed to query current user id: id exited with an error"));
    }
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse::<u32>()
        .context("failed to parse current user id")
}
