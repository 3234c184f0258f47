use super::*;

#[test]
fn builtin_catalog_parses_and_validates() {
    let catalog = builtin_catalog().expect("must parse builtin catalog");
    assert!(!catalog.is_empty());
    for application in &catalog {
        assert!(!application.display_name.trim().is_empty());
        assert!(!application.legacy_name.trim().is_empty());
    }
}

#[test]
fn builtin_catalog_contains_one_apt_only_utility() {
    let catalog = builtin_catalog().expect("must parse builtin catalog");
    let apt_only = catalog
        .iter()
        .filter(|application| application.is_apt_only())
        .collect::<Vec<_>>();
    assert_eq!(apt_only.len(), 1);
    assert_eq!(apt_only[0].legacy_name, "grsync");
}

#[test]
fn catalog_entry_with_flatpak_id_is_not_apt_only() {
    let catalog = catalog_from_toml_str(
        "[[application]]\ndisplay_name = \"Spotify\"\nlegacy_name = \"spotify\"\nflatpak_id = \"com.spotify.Client\"\n",
    )
    .expect("must parse");
    assert!(!catalog[0].is_apt_only());
    assert_eq!(catalog[0].flatpak_id.as_deref(), Some("com.spotify.Client"));
}

#[test]
fn catalog_rejects_empty_document() {
    let err = catalog_from_toml_str("").expect_err("empty catalog must be rejected");
    assert!(err.to_string().contains("must not be empty"));
}

#[test]
fn catalog_rejects_empty_legacy_name() {
    let err = catalog_from_toml_str(
        "[[application]]\ndisplay_name = \"Spotify\"\nlegacy_name = \"\"\n",
    )
    .expect_err("empty legacy name must be rejected");
    assert!(err.to_string().contains("legacy package name"));
}

#[test]
fn catalog_rejects_duplicate_legacy_name() {
    let input = "[[application]]\ndisplay_name = \"A\"\nlegacy_name = \"vlc\"\n\n[[application]]\ndisplay_name = \"B\"\nlegacy_name = \"vlc\"\n";
    let err = catalog_from_toml_str(input).expect_err("duplicate legacy name must be rejected");
    assert!(err.to_string().contains("duplicate legacy package name"));
}

#[test]
fn catalog_rejects_duplicate_flatpak_id() {
    let input = "[[application]]\ndisplay_name = \"A\"\nlegacy_name = \"a\"\nflatpak_id = \"org.example.App\"\n\n[[application]]\ndisplay_name = \"B\"\nlegacy_name = \"b\"\nflatpak_id = \"org.example.App\"\n";
    let err = catalog_from_toml_str(input).expect_err("duplicate flatpak id must be rejected");
    assert!(err.to_string().contains("duplicate flatpak id"));
}

#[test]
fn catalog_rejects_blank_flatpak_id() {
    let err = catalog_from_toml_str(
        "[[application]]\ndisplay_name = \"A\"\nlegacy_name = \"a\"\nflatpak_id = \"  \"\n",
    )
    .expect_err("blank flatpak id must be rejected");
    assert!(err.to_string().contains("flatpak id must not be empty"));
}

#[test]
fn migration_phase_labels_are_stable() {
    assert_eq!(MigrationPhase::RemovedLegacy.as_str(), "removed-legacy");
    assert_eq!(MigrationPhase::InstalledTarget.as_str(), "installed-target");
    assert_eq!(MigrationPhase::AlreadyPresent.as_str(), "already-present");
    assert_eq!(MigrationPhase::Skipped.as_str(), "skipped");
    assert_eq!(MigrationPhase::Failed.as_str(), "failed");
}
