use std::collections::HashSet;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogApplication {
    pub display_name: String,
    pub legacy_name: String,
    #[serde(default)]
    pub flatpak_id: Option<String>,
}

impl CatalogApplication {
    pub fn is_apt_only(&self) -> bool {
        self.flatpak_id.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    application: Vec<CatalogApplication>,
}

pub fn builtin_catalog() -> Result<Vec<CatalogApplication>> {
    catalog_from_toml_str(include_str!("../catalog.toml"))
}

pub fn catalog_from_toml_str(input: &str) -> Result<Vec<CatalogApplication>> {
    let document: CatalogDocument =
        toml::from_str(input).context("failed to parse application catalog")?;
    if document.application.is_empty() {
        return Err(anyhow!("application catalog must not be empty"));
    }

    let mut seen_legacy_names = HashSet::new();
    let mut seen_flatpak_ids = HashSet::new();
    for application in &document.application {
        if application.display_name.trim().is_empty() {
            return Err(anyhow!("catalog display name must not be empty"));
        }
        if application.legacy_name.trim().is_empty() {
            return Err(anyhow!(
                "catalog legacy package name must not be empty for '{}'",
                application.display_name
            ));
        }
        if !seen_legacy_names.insert(application.legacy_name.clone()) {
            return Err(anyhow!(
                "duplicate legacy package name in catalog: {}",
                application.legacy_name
            ));
        }
        if let Some(flatpak_id) = &application.flatpak_id {
            if flatpak_id.trim().is_empty() {
                return Err(anyhow!(
                    "catalog flatpak id must not be empty for '{}'",
                    application.display_name
                ));
            }
            if !seen_flatpak_ids.insert(flatpak_id.clone()) {
                return Err(anyhow!("duplicate flatpak id in catalog: {flatpak_id}"));
            }
        }
    }

    Ok(document.application)
}
