use super::*;
use std::cell::{Cell, RefCell};
use std::process::Command;
use std::time::Duration;

use anyhow::anyhow;

use crate::commands::{
    build_apt_autoremove_command, build_apt_remove_command, build_apt_update_command,
    build_dpkg_status_command, build_flatpak_install_command, build_flatpak_list_command,
    build_flatpak_remote_add_command, build_snap_remove_command, FLATHUB_REPO_URL,
};
use crate::query::is_installed_with_capture;
use crate::retry::with_retry_and_sleeper;

fn command_parts(command: &Command) -> Vec<String> {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned()),
    );
    parts
}

fn capture(success: bool, stdout: &str) -> CommandCapture {
    CommandCapture {
        success,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

#[test]
fn dpkg_status_command_queries_by_package_name() {
    let command = build_dpkg_status_command("spotify");
    assert_eq!(
        command_parts(&command),
        vec!["dpkg-query", "-W", "-f=${Status}", "spotify"]
    );
}

#[test]
fn apt_remove_command_is_noninteractive() {
    let command = build_apt_remove_command("vlc");
    assert_eq!(command_parts(&command), vec!["apt-get", "remove", "-y", "vlc"]);
}

#[test]
fn snap_remove_command_targets_package() {
    let command = build_snap_remove_command("spotify");
    assert_eq!(command_parts(&command), vec!["snap", "remove", "spotify"]);
}

#[test]
fn flatpak_install_command_pulls_from_flathub() {
    let command = build_flatpak_install_command("com.spotify.Client");
    assert_eq!(
        command_parts(&command),
        vec![
            "flatpak",
            "install",
            "-y",
            "--noninteractive",
            "flathub",
            "com.spotify.Client"
        ]
    );
}

#[test]
fn flatpak_remote_add_command_is_idempotent() {
    let command = build_flatpak_remote_add_command();
    assert_eq!(
        command_parts(&command),
        vec![
            "flatpak",
            "remote-add",
            "--if-not-exists",
            "flathub",
            FLATHUB_REPO_URL
        ]
    );
}

#[test]
fn flatpak_list_command_prints_application_ids() {
    let command = build_flatpak_list_command();
    assert_eq!(
        command_parts(&command),
        vec!["flatpak", "list", "--app", "--columns=application"]
    );
}

#[test]
fn apt_index_and_cleanup_commands_match_contract() {
    assert_eq!(command_parts(&build_apt_update_command()), vec!["apt-get", "update"]);
    assert_eq!(
        command_parts(&build_apt_autoremove_command()),
        vec!["apt-get", "autoremove", "-y"]
    );
}

#[test]
fn apt_query_reports_not_installed_on_nonzero_exit() {
    let installed = is_installed_with_capture(PackageSource::Apt, "spotify", |_, _| {
        Ok(capture(false, ""))
    })
    .expect("missing package must be a normal false");
    assert!(!installed);
}

#[test]
fn apt_query_requires_install_ok_installed_status() {
    let installed = is_installed_with_capture(PackageSource::Apt, "spotify", |_, _| {
        Ok(capture(true, "deinstall ok config-files"))
    })
    .expect("must query");
    assert!(!installed);

    let installed = is_installed_with_capture(PackageSource::Apt, "spotify", |_, _| {
        Ok(capture(true, "install ok installed"))
    })
    .expect("must query");
    assert!(installed);
}

#[test]
fn snap_query_matches_against_full_listing() {
    let listing = "Name      Version  Rev  Tracking  Publisher  Notes\nspotify   1.2.31   123  stable    spotify    -\n";
    let installed = is_installed_with_capture(PackageSource::Snap, "spotify", |_, _| {
        Ok(capture(true, listing))
    })
    .expect("must query");
    assert!(installed);

    let installed = is_installed_with_capture(PackageSource::Snap, "gimp", |_, _| {
        Ok(capture(true, listing))
    })
    .expect("must query");
    assert!(!installed);
}

#[test]
fn snap_query_treats_listing_failure_as_not_installed() {
    let installed = is_installed_with_capture(PackageSource::Snap, "spotify", |_, _| {
        Ok(capture(false, ""))
    })
    .expect("snapless host must be a normal false");
    assert!(!installed);
}

#[test]
fn flatpak_query_matches_application_id() {
    let listing = "com.spotify.Client\norg.videolan.VLC\n";
    let installed = is_installed_with_capture(PackageSource::Flatpak, "org.videolan.VLC", |_, _| {
        Ok(capture(true, listing))
    })
    .expect("must query");
    assert!(installed);
}

#[test]
fn flatpak_query_matches_substring_of_other_id() {
    // known loose behavior: containment over the whole listing
    let listing = "org.gimp.GIMP.Manual\n";
    let installed = is_installed_with_capture(PackageSource::Flatpak, "org.gimp.GIMP", |_, _| {
        Ok(capture(true, listing))
    })
    .expect("must query");
    assert!(installed);
}

#[test]
fn flatpak_query_propagates_listing_failure() {
    let err = is_installed_with_capture(PackageSource::Flatpak, "com.spotify.Client", |_, _| {
        Ok(CommandCapture {
            success: false,
            stdout: String::new(),
            stderr: "error: No remote refs found".to_string(),
        })
    })
    .expect_err("flatpak listing failure must propagate");
    assert!(err.to_string().contains("failed to list installed flatpak applications"));
}

#[test]
fn query_propagates_spawn_failure() {
    let err = is_installed_with_capture(PackageSource::Apt, "spotify", |_, _| {
        Err(anyhow!("command failed to start"))
    })
    .expect_err("spawn failure must propagate");
    assert!(err.to_string().contains("command failed to start"));
}

#[test]
fn legacy_source_maps_to_package_source() {
    assert_eq!(LegacySource::Apt.as_package_source(), PackageSource::Apt);
    assert_eq!(LegacySource::Snap.as_package_source(), PackageSource::Snap);
    assert_eq!(LegacySource::Apt.as_str(), "apt");
    assert_eq!(LegacySource::Snap.as_str(), "snap");
    assert_eq!(PackageSource::Flatpak.as_str(), "flatpak");
}

#[test]
fn retry_returns_first_success_without_sleeping() {
    let attempts = Cell::new(0_u32);
    let sleeps = RefCell::new(Vec::new());
    let value = with_retry_and_sleeper(
        "install of 'demo'",
        3,
        Duration::from_secs(2),
        || {
            attempts.set(attempts.get() + 1);
            Ok(42_u32)
        },
        |delay| sleeps.borrow_mut().push(delay),
    )
    .expect("must succeed on first attempt");

    assert_eq!(value, 42);
    assert_eq!(attempts.get(), 1);
    assert!(sleeps.borrow().is_empty());
}

#[test]
fn retry_pauses_between_attempts_then_succeeds() {
    let attempts = Cell::new(0_u32);
    let sleeps = RefCell::new(Vec::new());
    with_retry_and_sleeper(
        "install of 'demo'",
        3,
        Duration::from_secs(2),
        || {
            attempts.set(attempts.get() + 1);
            if attempts.get() < 3 {
                return Err(anyhow!("transient failure"));
            }
            Ok(())
        },
        |delay| sleeps.borrow_mut().push(delay),
    )
    .expect("third attempt must succeed");

    assert_eq!(attempts.get(), 3);
    assert_eq!(
        *sleeps.borrow(),
        vec![Duration::from_secs(2), Duration::from_secs(2)]
    );
}

#[test]
fn retry_exhaustion_stops_after_exactly_three_attempts() {
    let attempts = Cell::new(0_u32);
    let sleeps = RefCell::new(Vec::new());
    let err = with_retry_and_sleeper(
        "install of 'com.spotify.Client'",
        3,
        Duration::from_secs(2),
        || -> anyhow::Result<()> {
            attempts.set(attempts.get() + 1);
            Err(anyhow!("network unreachable"))
        },
        |delay| sleeps.borrow_mut().push(delay),
    )
    .expect_err("exhaustion must fail");

    assert_eq!(attempts.get(), 3);
    assert_eq!(sleeps.borrow().len(), 2);
    let message = err.to_string();
    assert!(message.contains("install of 'com.spotify.Client'"));
    assert!(message.contains("failed after 3 attempts"));
}

#[test]
fn retry_defaults_match_install_policy() {
    assert_eq!(DEFAULT_INSTALL_ATTEMPTS, 3);
    assert_eq!(DEFAULT_RETRY_DELAY, Duration::from_secs(2));
}
