//! Хранение настроек PDF в key-value хранилище (localStorage в браузере).
//!
//! Persistence is best-effort: [`PdfOptionsStore`] never returns an error.
//! Failed writes are logged and skipped; unreadable or corrupt entries load
//! as the template defaults.

use super::constants::STORAGE_KEY_PREFIX;
use super::options::ProposalPdfOptions;
use super::template::PdfTemplate;
use std::cell::RefCell;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage quota exceeded while writing {0}")]
    QuotaExceeded(String),
    #[error("storage error: {0}")]
    Backend(String),
}

/// Minimal string key-value store, shaped after `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-memory store with an optional byte quota (key + value lengths)
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: RefCell::new(BTreeMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.items.borrow_mut();
        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded(key.to_string()));
            }
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

/// `pdfOptions_{proposalId}_{templateId}`
pub fn storage_key(proposal_id: i64, template: PdfTemplate) -> String {
    format!("{}_{}_{}", STORAGE_KEY_PREFIX, proposal_id, template.as_str())
}

fn proposal_prefix(proposal_id: i64) -> String {
    format!("{}_{}_", STORAGE_KEY_PREFIX, proposal_id)
}

pub struct PdfOptionsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PdfOptionsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn save(&self, proposal_id: i64, template: PdfTemplate, options: &ProposalPdfOptions) {
        let key = storage_key(proposal_id, template);
        let raw = match serde_json::to_string(options) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Failed to serialize PDF options for {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set_item(&key, &raw) {
            log::warn!("Failed to save PDF options for {}: {}", key, e);
        }
    }

    /// Stored options merged over `defaults`, or `defaults` when nothing
    /// usable is stored.
    pub fn load(
        &self,
        proposal_id: i64,
        template: PdfTemplate,
        defaults: ProposalPdfOptions,
    ) -> ProposalPdfOptions {
        let key = storage_key(proposal_id, template);
        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return defaults,
            Err(e) => {
                log::warn!("Failed to read PDF options for {}: {}", key, e);
                return defaults;
            }
        };

        match merge_over_defaults(&raw, &defaults) {
            Ok(options) => {
                let unknown = options.unknown_field_keys();
                if !unknown.is_empty() {
                    log::warn!("{} has fields missing from the catalog: {:?}", key, unknown);
                }
                options
            }
            Err(e) => {
                log::warn!("Stored PDF options for {} are unreadable, using defaults: {}", key, e);
                defaults
            }
        }
    }

    pub fn clear(&self, proposal_id: i64, template: PdfTemplate) {
        let key = storage_key(proposal_id, template);
        if let Err(e) = self.store.remove_item(&key) {
            log::warn!("Failed to clear PDF options for {}: {}", key, e);
        }
    }

    /// Remove the entries of every template for `proposal_id`
    pub fn clear_all(&self, proposal_id: i64) {
        let prefix = proposal_prefix(proposal_id);
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                log::warn!("Failed to list stored PDF options: {}", e);
                return;
            }
        };
        for key in keys.iter().filter(|k| k.starts_with(&prefix)) {
            if let Err(e) = self.store.remove_item(key) {
                log::warn!("Failed to clear PDF options for {}: {}", key, e);
            }
        }
    }
}

/// Top-level keys present in `raw` replace the ones in `defaults`
fn merge_over_defaults(
    raw: &str,
    defaults: &ProposalPdfOptions,
) -> Result<ProposalPdfOptions, serde_json::Error> {
    let stored: serde_json::Value = serde_json::from_str(raw)?;
    let mut merged = serde_json::to_value(defaults)?;

    match (merged.as_object_mut(), stored) {
        (Some(target), serde_json::Value::Object(source)) => {
            for (key, value) in source {
                target.insert(key, value);
            }
        }
        (_, other) => {
            return Err(serde::de::Error::custom(format!(
                "expected an object, found {}",
                other
            )))
        }
    }

    serde_json::from_value(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pdf_options::options::{defaults_for, CustomSection, ImageSlots};

    fn sample_options() -> ProposalPdfOptions {
        let mut options = defaults_for(PdfTemplate::PrettyProposal);
        options.product_image_slots.insert(
            42,
            ImageSlots {
                primary: Some("imgB".into()),
                secondary: vec!["imgA".into(), "imgC".into()],
            },
        );
        options.selected_material_images.insert(9, vec!["m1".into()]);
        options.custom_sections.push(CustomSection {
            id: "s1".into(),
            title: "Finishes".into(),
            images: vec![],
        });
        options.show_pieces = false;
        options
    }

    #[test]
    fn test_key_format() {
        assert_eq!(
            storage_key(7, PdfTemplate::PrettyProposal),
            "pdfOptions_7_pretty_proposal"
        );
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        let options = sample_options();
        store.save(7, PdfTemplate::PrettyProposal, &options);
        let loaded = store.load(
            7,
            PdfTemplate::PrettyProposal,
            defaults_for(PdfTemplate::PrettyProposal),
        );
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_missing_entry_returns_defaults() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        let defaults = defaults_for(PdfTemplate::CleanProposal);
        assert_eq!(
            store.load(1, PdfTemplate::CleanProposal, defaults.clone()),
            defaults
        );
    }

    #[test]
    fn test_corrupt_entry_returns_defaults() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        store.save(7, PdfTemplate::PrettyProposal, &sample_options());
        store
            .inner()
            .set_item("pdfOptions_7_pretty_proposal", "{not json")
            .unwrap();

        let defaults = defaults_for(PdfTemplate::PrettyProposal);
        assert_eq!(
            store.load(7, PdfTemplate::PrettyProposal, defaults.clone()),
            defaults
        );
    }

    #[test]
    fn test_non_object_entry_returns_defaults() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        store.inner().set_item("pdfOptions_3_product_summary", "[1,2]").unwrap();
        let defaults = defaults_for(PdfTemplate::ProductSummary);
        assert_eq!(
            store.load(3, PdfTemplate::ProductSummary, defaults.clone()),
            defaults
        );
    }

    #[test]
    fn test_partial_entry_is_merged_over_defaults() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        store
            .inner()
            .set_item(
                "pdfOptions_7_pretty_proposal",
                r#"{"showPieces": false, "selectedImages": {"42": ["a"]}}"#,
            )
            .unwrap();

        let loaded = store.load(
            7,
            PdfTemplate::PrettyProposal,
            defaults_for(PdfTemplate::PrettyProposal),
        );
        assert!(!loaded.show_pieces);
        assert!(loaded.show_materials);
        assert_eq!(loaded.selected_images[&42], vec!["a"]);
        assert_eq!(
            loaded.selected_product_info_fields,
            defaults_for(PdfTemplate::PrettyProposal).selected_product_info_fields
        );
    }

    #[test]
    fn test_quota_failure_is_swallowed() {
        let store = PdfOptionsStore::new(MemoryStore::with_quota(16));
        store.save(7, PdfTemplate::PrettyProposal, &sample_options());
        assert!(store.inner().is_empty());
        let defaults = defaults_for(PdfTemplate::PrettyProposal);
        assert_eq!(
            store.load(7, PdfTemplate::PrettyProposal, defaults.clone()),
            defaults
        );
    }

    #[test]
    fn test_clear_and_clear_all() {
        let store = PdfOptionsStore::new(MemoryStore::new());
        let options = sample_options();
        store.save(7, PdfTemplate::PrettyProposal, &options);
        store.save(7, PdfTemplate::CleanProposal, &options);
        store.save(70, PdfTemplate::CleanProposal, &options);
        store.inner().set_item("app-theme", "dark").unwrap();

        store.clear(7, PdfTemplate::PrettyProposal);
        store.clear(7, PdfTemplate::PrettyProposal);
        assert_eq!(store.inner().len(), 3);

        store.clear_all(7);
        store.clear_all(7);
        assert_eq!(
            store.inner().keys().unwrap(),
            vec!["app-theme", "pdfOptions_70_clean_proposal"]
        );
    }
}
