use std::process::Command;

use anyhow::{anyhow, Context, Result};

use crate::CommandCapture;

pub(crate) const FLATHUB_REMOTE_NAME: &str = "flathub";
pub(crate) const FLATHUB_REPO_URL: &str = "https://dl.flathub.org/repo/flathub.flatpakrepo";

pub(crate) fn build_dpkg_status_command(package_name: &str) -> Command {
    let mut command = Command::new("dpkg-query");
    command.arg("-W").arg("-f=${Status}").arg(package_name);
    command
}

pub(crate) fn build_snap_list_command() -> Command {
    let mut command = Command::new("snap");
    command.arg("list");
    command
}

pub(crate) fn build_flatpak_list_command() -> Command {
    let mut command = Command::new("flatpak");
    command.arg("list").arg("--app").arg("--columns=application");
    command
}

pub(crate) fn build_apt_remove_command(package_name: &str) -> Command {
    let mut command = Command::new("apt-get");
    command.arg("remove").arg("-y").arg(package_name);
    command
}

pub(crate) fn build_snap_remove_command(package_name: &str) -> Command {
    let mut command = Command::new("snap");
    command.arg("remove").arg(package_name);
    command
}

pub(crate) fn build_flatpak_install_command(app_id: &str) -> Command {
    let mut command = Command::new("flatpak");
    command
        .arg("install")
        .arg("-y")
        .arg("--noninteractive")
        .arg(FLATHUB_REMOTE_NAME)
        .arg(app_id);
    command
}

pub(crate) fn build_apt_install_command(package_name: &str) -> Command {
    let mut command = Command::new("apt-get");
    command.arg("install").arg("-y").arg(package_name);
    command
}

pub(crate) fn build_apt_update_command() -> Command {
    let mut command = Command::new("apt-get");
    command.arg("update");
    command
}

pub(crate) fn build_apt_autoremove_command() -> Command {
    let mut command = Command::new("apt-get");
    command.arg("autoremove").arg("-y");
    command
}

pub(crate) fn build_flatpak_remote_add_command() -> Command {
    let mut command = Command::new("flatpak");
    command
        .arg("remote-add")
        .arg("--if-not-exists")
        .arg(FLATHUB_REMOTE_NAME)
        .arg(FLATHUB_REPO_URL);
    command
}

pub(crate) fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

pub(crate) fn capture_command(command: &mut Command, context_message: &str) -> Result<CommandCapture> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    Ok(CommandCapture {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
