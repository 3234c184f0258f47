#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    RemovedLegacy,
    InstalledTarget,
    AlreadyPresent,
    Skipped,
    Failed,
}

impl MigrationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemovedLegacy => "removed-legacy",
            Self::InstalledTarget => "installed-target",
            Self::AlreadyPresent => "already-present",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    pub display_name: String,
    pub phase: MigrationPhase,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub install_only_missing: bool,
}
