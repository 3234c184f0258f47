use anyhow::Result;

use crate::commands::{
    build_apt_autoremove_command, build_apt_install_command, build_apt_remove_command,
    build_apt_update_command, build_flatpak_install_command, build_flatpak_remote_add_command,
    build_snap_remove_command, run_command,
};
use crate::LegacySource;

pub fn remove_legacy_package(source: LegacySource, package_name: &str) -> Result<()> {
    match source {
        LegacySource::Apt => run_command(
            &mut build_apt_remove_command(package_name),
            &format!("failed to remove apt package '{package_name}'"),
        ),
        LegacySource::Snap => run_command(
            &mut build_snap_remove_command(package_name),
            &format!("failed to remove snap '{package_name}'"),
        ),
    }
}

pub fn install_flatpak_app(app_id: &str) -> Result<()> {
    run_command(
        &mut build_flatpak_install_command(app_id),
        &format!("failed to install flatpak application '{app_id}'"),
    )
}

pub fn install_apt_package(package_name: &str) -> Result<()> {
    run_command(
        &mut build_apt_install_command(package_name),
        &format!("failed to install apt package '{package_name}'"),
    )
}

pub fn refresh_package_index() -> Result<()> {
    run_command(
        &mut build_apt_update_command(),
        "failed to refresh apt package index",
    )
}

pub fn install_flatpak_runtime() -> Result<()> {
    run_command(
        &mut build_apt_install_command("flatpak"),
        "failed to install the flatpak runtime",
    )
}

pub fn add_flatpak_remote() -> Result<()> {
    run_command(
        &mut build_flatpak_remote_add_command(),
        "failed to add the flathub remote",
    )
}

pub fn remove_unused_dependencies() -> Result<()> {
    run_command(
        &mut build_apt_autoremove_command(),
        "failed to remove unused apt dependencies",
    )
}
