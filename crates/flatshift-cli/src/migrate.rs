use anyhow::Result;
use flatshift_core::{CatalogApplication, MigrationOutcome, MigrationPhase, RunOptions};
use flatshift_sources::{with_retry, LegacySource, PackageOps, PackageSource};

use crate::render::{render_status_line, MigrationProgress, TerminalRenderer};
use crate::report::ReportAggregator;

pub fn run_migration<Ops: PackageOps>(
    ops: &mut Ops,
    catalog: &[CatalogApplication],
    options: &RunOptions,
    report: &mut ReportAggregator,
    renderer: TerminalRenderer,
) -> Result<()> {
    renderer.print_status("step", "refreshing apt package index");
    ops.refresh_package_index()?;
    renderer.print_status("step", "ensuring the flatpak runtime is installed");
    ops.install_flatpak_runtime()?;
    renderer.print_status("step", "ensuring the flathub remote is configured");
    ops.add_flatpak_remote()?;

    let mut removed_any = false;
    let mut progress = renderer.start_progress("migrate", catalog.len() as u64);
    for (index, application) in catalog.iter().enumerate() {
        match migrate_application(ops, application, options, report, &progress) {
            Ok(entry_removed) => removed_any = removed_any || entry_removed,
            Err(err) => {
                progress.finish_abandon();
                return Err(err);
            }
        }
        progress.set((index + 1) as u64);
    }
    progress.finish_success();

    if removed_any {
        renderer.print_status("step", "removing unused apt dependencies");
        if let Err(err) = ops.remove_unused_dependencies() {
            report.record(MigrationOutcome {
                display_name: "Dependency cleanup".to_string(),
                phase: MigrationPhase::Failed,
                detail: "failed to remove unused apt dependencies".to_string(),
            });
            return Err(err);
        }
        report.record(MigrationOutcome {
            display_name: "Dependency cleanup".to_string(),
            phase: MigrationPhase::RemovedLegacy,
            detail: "removed unused apt dependencies".to_string(),
        });
    }

    Ok(())
}

fn migrate_application<Ops: PackageOps>(
    ops: &mut Ops,
    application: &CatalogApplication,
    options: &RunOptions,
    report: &mut ReportAggregator,
    progress: &MigrationProgress,
) -> Result<bool> {
    let Some(flatpak_id) = application.flatpak_id.as_deref() else {
        migrate_apt_only(ops, application, report, progress)?;
        return Ok(false);
    };

    if options.install_only_missing && ops.is_installed(PackageSource::Flatpak, flatpak_id)? {
        record(
            report,
            progress,
            application,
            MigrationPhase::Skipped,
            format!("{flatpak_id} already installed, skipped"),
        );
        return Ok(false);
    }

    let mut removed_any = false;
    for source in [LegacySource::Apt, LegacySource::Snap] {
        if !ops.is_installed(source.as_package_source(), &application.legacy_name)? {
            continue;
        }
        if let Err(err) = ops.remove_legacy(source, &application.legacy_name) {
            record(
                report,
                progress,
                application,
                MigrationPhase::Failed,
                format!(
                    "failed to remove {} package '{}'",
                    source.as_str(),
                    application.legacy_name
                ),
            );
            return Err(err.context(format!(
                "removal of '{}' via {} failed; aborting to avoid a dual installation",
                application.legacy_name,
                source.as_str()
            )));
        }
        record(
            report,
            progress,
            application,
            MigrationPhase::RemovedLegacy,
            format!(
                "removed {} package '{}'",
                source.as_str(),
                application.legacy_name
            ),
        );
        removed_any = true;
    }

    if ops.is_installed(PackageSource::Flatpak, flatpak_id)? {
        record(
            report,
            progress,
            application,
            MigrationPhase::AlreadyPresent,
            format!("{flatpak_id} already installed"),
        );
        return Ok(removed_any);
    }

    let label = format!("install of '{flatpak_id}'");
    match with_retry(&label, || ops.install_flatpak_app(flatpak_id)) {
        Ok(()) => record(
            report,
            progress,
            application,
            MigrationPhase::InstalledTarget,
            format!("installed {flatpak_id} from flathub"),
        ),
        Err(err) => record(
            report,
            progress,
            application,
            MigrationPhase::Failed,
            format!("{err:#}"),
        ),
    }

    Ok(removed_any)
}

fn migrate_apt_only<Ops: PackageOps>(
    ops: &mut Ops,
    application: &CatalogApplication,
    report: &mut ReportAggregator,
    progress: &MigrationProgress,
) -> Result<()> {
    if ops.is_installed(PackageSource::Apt, &application.legacy_name)? {
        record(
            report,
            progress,
            application,
            MigrationPhase::AlreadyPresent,
            format!("apt package '{}' already installed", application.legacy_name),
        );
        return Ok(());
    }

    if let Err(err) = ops.install_apt_package(&application.legacy_name) {
        record(
            report,
            progress,
            application,
            MigrationPhase::Failed,
            format!("failed to install apt package '{}'", application.legacy_name),
        );
        return Err(err.context(format!(
            "install of apt-only package '{}' failed",
            application.legacy_name
        )));
    }

    record(
        report,
        progress,
        application,
        MigrationPhase::InstalledTarget,
        format!("installed apt package '{}'", application.legacy_name),
    );
    Ok(())
}

fn record(
    report: &mut ReportAggregator,
    progress: &MigrationProgress,
    application: &CatalogApplication,
    phase: MigrationPhase,
    detail: String,
) {
    let status = match phase {
        MigrationPhase::RemovedLegacy | MigrationPhase::InstalledTarget => "ok",
        MigrationPhase::AlreadyPresent | MigrationPhase::Skipped => "step",
        MigrationPhase::Failed => "err",
    };
    progress.println(&render_status_line(
        progress.style(),
        status,
        &format!("{}: {detail}", application.display_name),
    ));
    report.record(MigrationOutcome {
        display_name: application.display_name.clone(),
        phase,
        detail,
    });
}
