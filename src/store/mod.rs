//! Persisted global style records.
//!
//! Global styles live in the host's key-value configuration storage as two
//! JSON records, one per [`StyleFamily`]. A [`ConfigStore`] reads and writes
//! those blobs; [`GlobalStyles`] is the snapshot loaded at request start and
//! written back only when an administrator saves the settings form.
//!
//! An absent record means "use the registry defaults". A record that is not a
//! JSON object is logged and treated as absent.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::config::CardConfig;
use crate::error::{Error, Result};
use crate::style::{StyleFamily, StyleMap, StyleOverrides};

/// Key-value storage for configuration records.
pub trait ConfigStore {
    /// Reads the record stored under `name`, or `None` if there is none.
    fn load(&self, name: &str) -> Result<Option<serde_json::Value>>;

    /// Replaces the record stored under `name`.
    fn save(&mut self, name: &str, record: &serde_json::Value) -> Result<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &mut S {
    fn load(&self, name: &str) -> Result<Option<serde_json::Value>> {
        (**self).load(name)
    }

    fn save(&mut self, name: &str, record: &serde_json::Value) -> Result<()> {
        (**self).save(name, record)
    }
}

/// The stored global overrides, one optional record per family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalStyles {
    colors: Option<StyleOverrides>,
    typography: Option<StyleOverrides>,
}

impl GlobalStyles {
    /// Global styles with no stored records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds global styles from already-parsed records.
    ///
    /// Entries that belong to the other family are dropped.
    pub fn from_records(colors: Option<StyleOverrides>, typography: Option<StyleOverrides>) -> Self {
        Self {
            colors: colors.map(|record| record.only(StyleFamily::Colors)),
            typography: typography.map(|record| record.only(StyleFamily::Typography)),
        }
    }

    /// Loads both records from `store`.
    pub fn load<S: ConfigStore + ?Sized>(store: &S, config: &CardConfig) -> Result<Self> {
        let colors = load_record(store, config, StyleFamily::Colors)?;
        let typography = load_record(store, config, StyleFamily::Typography)?;
        Ok(Self::from_records(colors, typography))
    }

    /// Writes the given families of `map` to `store`, one record each.
    ///
    /// Families not listed keep their stored record.
    pub fn save<S: ConfigStore + ?Sized>(
        store: &mut S,
        config: &CardConfig,
        map: &StyleMap,
        families: &[StyleFamily],
    ) -> Result<()> {
        for &family in families {
            let name = config.record_name(family);
            let record = serde_json::to_value(map.to_record(family))
                .map_err(|e| Error::json(name, e))?;
            store.save(name, &record)?;
            tracing::info!("Saved {} record '{}'", family, name);
        }
        Ok(())
    }

    /// The stored record of `family`, if any.
    pub fn record(&self, family: StyleFamily) -> Option<&StyleOverrides> {
        match family {
            StyleFamily::Colors => self.colors.as_ref(),
            StyleFamily::Typography => self.typography.as_ref(),
        }
    }

    /// Both records merged into one set of overrides, or `None` if neither
    /// record is stored.
    pub fn overrides(&self) -> Option<StyleOverrides> {
        if self.colors.is_none() && self.typography.is_none() {
            return None;
        }
        let mut merged = StyleOverrides::new();
        for record in [&self.colors, &self.typography].into_iter().flatten() {
            merged.extend(record);
        }
        Some(merged)
    }
}

fn load_record<S: ConfigStore + ?Sized>(
    store: &S,
    config: &CardConfig,
    family: StyleFamily,
) -> Result<Option<StyleOverrides>> {
    let name = config.record_name(family);
    let value = match store.load(name) {
        Ok(value) => value,
        Err(Error::Json { record, source }) => {
            tracing::warn!("Ignoring unreadable record '{}': {}", record, source);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    match value {
        None => Ok(None),
        Some(serde_json::Value::Object(record)) => Ok(Some(StyleOverrides::from_record(&record))),
        Some(other) => {
            tracing::warn!("Ignoring record '{}': expected an object, found {}", name, other);
            Ok(None)
        }
    }
}
