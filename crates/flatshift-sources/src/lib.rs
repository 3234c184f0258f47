mod commands;
mod mutate;
mod query;
mod retry;

pub use mutate::{
    add_flatpak_remote, install_apt_package, install_flatpak_app, install_flatpak_runtime,
    refresh_package_index, remove_legacy_package, remove_unused_dependencies,
};
pub use query::is_installed_via;
pub use retry::{with_retry, DEFAULT_INSTALL_ATTEMPTS, DEFAULT_RETRY_DELAY};

use anyhow::Result;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageSource {
    Apt,
    Snap,
    Flatpak,
}

impl PackageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Snap => "snap",
            Self::Flatpak => "flatpak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacySource {
    Apt,
    Snap,
}

impl LegacySource {
    pub fn as_package_source(self) -> PackageSource {
        match self {
            Self::Apt => PackageSource::Apt,
            Self::Snap => PackageSource::Snap,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Snap => "snap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandCapture {
    pub(crate) success: bool,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

pub trait PackageOps {
    fn is_installed(&mut self, source: PackageSource, identifier: &str) -> Result<bool>;
    fn remove_legacy(&mut self, source: LegacySource, package_name: &str) -> Result<()>;
    fn install_flatpak_app(&mut self, app_id: &str) -> Result<()>;
    fn install_apt_package(&mut self, package_name: &str) -> Result<()>;
    fn refresh_package_index(&mut self) -> Result<()>;
    fn install_flatpak_runtime(&mut self) -> Result<()>;
    fn add_flatpak_remote(&mut self) -> Result<()>;
    fn remove_unused_dependencies(&mut self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct SystemPackageOps;

impl PackageOps for SystemPackageOps {
    fn is_installed(&mut self, source: PackageSource, identifier: &str) -> Result<bool> {
        is_installed_via(source, identifier)
    }

    fn remove_legacy(&mut self, source: LegacySource, package_name: &str) -> Result<()> {
        remove_legacy_package(source, package_name)
    }

    fn install_flatpak_app(&mut self, app_id: &str) -> Result<()> {
        install_flatpak_app(app_id)
    }

    fn install_apt_package(&mut self, package_name: &str) -> Result<()> {
        install_apt_package(package_name)
    }

    fn refresh_package_index(&mut self) -> Result<()> {
        refresh_package_index()
    }

    fn install_flatpak_runtime(&mut self) -> Result<()> {
        install_flatpak_runtime()
    }

    fn add_flatpak_remote(&mut self) -> Result<()> {
        add_flatpak_remote()
    }

    fn remove_unused_dependencies(&mut self) -> Result<()> {
        remove_unused_dependencies()
    }
}
