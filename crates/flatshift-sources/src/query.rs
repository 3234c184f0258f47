use std::process::Command;

use anyhow::{anyhow, Result};

use crate::commands::{
    build_dpkg_status_command, build_flatpak_list_command, build_snap_list_command, capture_command,
};
use crate::{CommandCapture, PackageSource};

pub fn is_installed_via(source: PackageSource, identifier: &str) -> Result<bool> {
    is_installed_with_capture(source, identifier, capture_command)
}

pub(crate) fn is_installed_with_capture<Capture>(
    source: PackageSource,
    identifier: &str,
    mut capture: Capture,
) -> Result<bool>
where
    Capture: FnMut(&mut Command, &str) -> Result<CommandCapture>,
{
    match source {
        PackageSource::Apt => {
            let mut command = build_dpkg_status_command(identifier);
            let captured = capture(&mut command, "failed to query dpkg package status")?;
            Ok(captured.success && captured.stdout.contains("install ok installed"))
        }
        PackageSource::Snap => {
            let mut command = build_snap_list_command();
            let captured = capture(&mut command, "failed to list installed snaps")?;
            if !captured.success {
                // snap list exits non-zero when no snaps are installed
                return Ok(false);
            }
            Ok(captured.stdout.contains(identifier))
        }
        PackageSource::Flatpak => {
            let mut command = build_flatpak_list_command();
            let captured = capture(&mut command, "failed to list installed flatpak applications")?;
            if !captured.success {
                return Err(anyhow!(
                    "failed to list installed flatpak applications: stderr='{}'",
                    captured.stderr.trim()
                ));
            }
            Ok(captured.stdout.contains(identifier))
        }
    }
}
