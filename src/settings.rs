use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use crate::analysis::IntakeOptions;
use crate::guard::GuardConfig;
use crate::pagination::PaginationConfig;
use crate::report::{BucketVisibility, CompanyBranding, InspectorInfo};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSettings {
    pub branding: CompanyBranding,
    pub inspector: InspectorInfo,
    pub legal_boilerplate: String,
    pub pagination: PaginationConfig,
    pub guard: GuardConfig,
    pub analysis_timeout_secs: u64,
    pub default_visibility: BucketVisibility,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            branding: CompanyBranding::default(),
            inspector: InspectorInfo::default(),
            legal_boilerplate: String::new(),
            pagination: PaginationConfig::default(),
            guard: GuardConfig::default(),
            analysis_timeout_secs: 60,
            default_visibility: BucketVisibility::default(),
        }
    }
}

impl ReportSettings {
    pub fn intake_options(&self) -> IntakeOptions {
        IntakeOptions {
            guard: self.guard.clone(),
            timeout: Duration::from_secs(self.analysis_timeout_secs.max(1)),
        }
    }
}

/// Report settings backed by a JSON file. Reads are served from memory and
/// every update is written through.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<ReportSettings>,
}

impl SettingsStore {
    /// Load settings from `path`. A missing file gives defaults; so does an
    /// unparseable one, with a warning.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                ReportSettings::default()
            })
        } else {
            ReportSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> ReportSettings {
        self.read().clone()
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.read().pagination.clone()
    }

    pub fn update(&self, settings: ReportSettings) -> Result<()> {
        let mut guard = self.write();
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    /// Apply `change` to the current settings and write the result through.
    pub fn modify(&self, change: impl FnOnce(&mut ReportSettings)) -> Result<ReportSettings> {
        let mut guard = self.write();
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next.clone();
        Ok(next)
    }

    fn read(&self) -> RwLockReadGuard<'_, ReportSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ReportSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, data: &ReportSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        assert_eq!(store.get(), ReportSettings::default());
        assert_eq!(store.pagination().max_page_height, 1043);
    }

    #[test]
    fn test_garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();

        assert_eq!(store.get(), ReportSettings::default());
    }

    #[test]
    fn test_updates_are_written_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        store
            .modify(|settings| {
                settings.branding.name = "Imobiliária Sol".into();
                settings.analysis_timeout_secs = 30;
            })
            .unwrap();

        let reloaded = SettingsStore::new(path).unwrap().get();
        assert_eq!(reloaded.branding.name, "Imobiliária Sol");
        assert_eq!(reloaded.analysis_timeout_secs, 30);
        assert_eq!(reloaded.intake_options().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"legalBoilerplate": "Vistoria conforme Lei 8.245/91"}"#).unwrap();

        let settings = SettingsStore::new(path).unwrap().get();

        assert_eq!(settings.legal_boilerplate, "Vistoria conforme Lei 8.245/91");
        assert_eq!(settings.analysis_timeout_secs, 60);
        assert!(settings.default_visibility.unchanged);
    }
}
