use toml::Value;

use crate::error::Result;
use crate::plugin::host_fns::CacheStore;
use crate::plugin::manifest::{PluginId, RegistrationRecord, flag_is_set};

/// Reads and writes this plugin's entry inside the author's cache namespace.
#[derive(Debug, Clone)]
pub struct PluginInstaller {
    namespace: String,
    id: PluginId,
}

impl PluginInstaller {
    pub fn new(namespace: impl Into<String>, id: PluginId) -> Self {
        Self {
            namespace: namespace.into(),
            id,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Upsert a fresh record with the donation banner enabled.
    pub fn install(&self, cache: &mut dyn CacheStore) -> Result<()> {
        let mut entries = cache.read(&self.namespace)?.unwrap_or_default();
        entries.insert(
            self.id.as_key().to_string(),
            RegistrationRecord::fresh().to_value()?,
        );
        cache.update(&self.namespace, entries)
    }

    pub fn is_installed(&self, cache: &dyn CacheStore) -> Result<bool> {
        Ok(cache
            .read(&self.namespace)?
            .is_some_and(|entries| entries.contains_key(self.id.as_key())))
    }

    /// Remove the record, dropping the namespace row once nothing else lives there.
    pub fn uninstall(&self, cache: &mut dyn CacheStore) -> Result<()> {
        let mut entries = cache.read(&self.namespace)?.unwrap_or_default();
        entries.remove(self.id.as_key());

        if entries.is_empty() {
            return cache.delete(&self.namespace);
        }

        cache.update(&self.namespace, entries)
    }

    pub fn record(&self, cache: &dyn CacheStore) -> Result<Option<RegistrationRecord>> {
        cache
            .read(&self.namespace)?
            .and_then(|mut entries| entries.remove(self.id.as_key()))
            .map(RegistrationRecord::from_value)
            .transpose()
    }

    pub fn donation_enabled(&self, cache: &dyn CacheStore) -> Result<bool> {
        let Some(entries) = cache.read(&self.namespace)? else {
            return Ok(false);
        };

        Ok(entries
            .get(self.id.as_key())
            .and_then(|record| record.get("donation"))
            .is_some_and(flag_is_set))
    }

    /// Turn the donation flag off. Returns `false` when the plugin is not installed.
    pub fn disable_donation(&self, cache: &mut dyn CacheStore) -> Result<bool> {
        let Some(mut entries) = cache.read(&self.namespace)? else {
            return Ok(false);
        };

        let Some(Value::Table(record)) = entries.get_mut(self.id.as_key()) else {
            return Ok(false);
        };

        record.insert("donation".to_string(), Value::Integer(0));
        cache.update(&self.namespace, entries)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryCache;
    use toml::Table;

    fn installer() -> PluginInstaller {
        PluginInstaller::new("tedem", PluginId::default())
    }

    #[test]
    fn install_then_uninstall_drops_sole_namespace_row() {
        let mut cache = MemoryCache::default();
        let installer = installer();

        installer.install(&mut cache).unwrap();
        assert!(installer.is_installed(&cache).unwrap());
        assert_eq!(
            installer.record(&cache).unwrap(),
            Some(RegistrationRecord::fresh())
        );

        installer.uninstall(&mut cache).unwrap();
        assert!(!installer.is_installed(&cache).unwrap());
        assert!(!cache.contains("tedem"));
    }

    #[test]
    fn sibling_plugins_survive_install_and_uninstall() {
        let mut cache = MemoryCache::default();
        let mut sibling = Table::new();
        sibling.insert("version".into(), Value::String("2.0.0".into()));
        let mut entries = Table::new();
        entries.insert("other".into(), Value::Table(sibling.clone()));
        cache.update("tedem", entries).unwrap();

        let installer = installer();
        installer.install(&mut cache).unwrap();
        installer.uninstall(&mut cache).unwrap();

        let row = cache.read("tedem").unwrap().unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row["other"], Value::Table(sibling));
    }

    #[test]
    fn reinstall_resets_donation_flag() {
        let mut cache = MemoryCache::default();
        let installer = installer();

        installer.install(&mut cache).unwrap();
        assert!(installer.disable_donation(&mut cache).unwrap());
        assert!(!installer.donation_enabled(&cache).unwrap());

        installer.install(&mut cache).unwrap();
        assert!(installer.donation_enabled(&cache).unwrap());
    }

    #[test]
    fn record_and_status_agree_on_bool_flag() {
        let mut cache = MemoryCache::default();
        let installer = installer();
        installer.install(&mut cache).unwrap();

        let mut entries = cache.read("tedem").unwrap().unwrap();
        if let Some(Value::Table(record)) = entries.get_mut("heroicon") {
            record.insert("donation".into(), Value::Boolean(true));
        }
        cache.update("tedem", entries).unwrap();

        assert!(installer.donation_enabled(&cache).unwrap());
        assert_eq!(installer.record(&cache).unwrap().map(|r| r.donation), Some(1));
    }

    #[test]
    fn uninstall_without_install_leaves_no_row() {
        let mut cache = MemoryCache::default();
        installer().uninstall(&mut cache).unwrap();
        assert!(!cache.contains("tedem"));
    }

    #[test]
    fn disable_donation_needs_a_record() {
        let mut cache = MemoryCache::default();
        assert!(!installer().disable_donation(&mut cache).unwrap());
        assert!(cache.read("tedem").unwrap().is_none());
    }
}
