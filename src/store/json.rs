use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{faq_matches_any, FaqQuery, FaqStore, SettingsStore, StoreError, TenantScope};
use crate::models::{CompanySettings, Faq};
use crate::search::rank_faqs;

/// FAQ and settings snapshots held in memory, loaded from (and persisted to)
/// JSON files in the data directory.
pub struct JsonStore {
    faqs: RwLock<Vec<Faq>>,
    settings: RwLock<Vec<CompanySettings>>,
    faqs_path: Option<PathBuf>,
    settings_path: Option<PathBuf>,
}

impl JsonStore {
    /// Load both snapshots. A missing file is an empty table; a malformed one
    /// is an error.
    pub fn open(faqs_path: &Path, settings_path: &Path) -> Result<Self> {
        let faqs: Vec<Faq> = load_json(faqs_path)?;
        let settings: Vec<CompanySettings> = load_json(settings_path)?;

        tracing::info!(
            faqs = faqs.len(),
            companies = settings.len(),
            "Loaded FAQ store from {}",
            faqs_path.display()
        );

        Ok(Self {
            faqs: RwLock::new(faqs),
            settings: RwLock::new(settings),
            faqs_path: Some(faqs_path.to_path_buf()),
            settings_path: Some(settings_path.to_path_buf()),
        })
    }

    /// A store that lives only in memory.
    pub fn in_memory(faqs: Vec<Faq>, settings: Vec<CompanySettings>) -> Self {
        Self {
            faqs: RwLock::new(faqs),
            settings: RwLock::new(settings),
            faqs_path: None,
            settings_path: None,
        }
    }

    pub fn faq_count(&self) -> usize {
        self.faqs.read().len()
    }

    /// Insert or replace a FAQ by id and persist the snapshot.
    pub fn insert_faq(&self, faq: Faq) -> Result<()> {
        {
            let mut faqs = self.faqs.write();
            faqs.retain(|f| f.id != faq.id);
            faqs.push(faq);
        }
        if let Some(path) = &self.faqs_path {
            persist_json(path, &*self.faqs.read())?;
        }
        Ok(())
    }

    /// Insert or replace a company's settings and persist the snapshot.
    pub fn upsert_settings(&self, settings: CompanySettings) -> Result<()> {
        {
            let mut all = self.settings.write();
            all.retain(|s| s.company_id != settings.company_id);
            all.push(settings);
        }
        if let Some(path) = &self.settings_path {
            persist_json(path, &*self.settings.read())?;
        }
        Ok(())
    }
}

#[async_trait]
impl FaqStore for JsonStore {
    async fn search(&self, query: &FaqQuery) -> Result<Vec<Faq>, StoreError> {
        let faqs = self.faqs.read();
        let matched: Vec<Faq> = faqs
            .iter()
            .filter(|f| f.is_active)
            .filter(|f| match query.scope {
                TenantScope::Company(id) => f.company_id == id,
                TenantScope::AllTenants => true,
            })
            .filter(|f| faq_matches_any(f, &query.terms))
            .cloned()
            .collect();
        drop(faqs);

        let mut ranked = rank_faqs(matched);
        ranked.truncate(query.limit);
        Ok(ranked)
    }
}

#[async_trait]
impl SettingsStore for JsonStore {
    async fn company_settings(
        &self,
        company_id: i64,
    ) -> Result<Option<CompanySettings>, StoreError> {
        Ok(self
            .settings
            .read()
            .iter()
            .find(|s| s.company_id == company_id)
            .cloned())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Atomic write via temp file + rename.
fn persist_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
