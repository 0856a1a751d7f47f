use std::collections::HashMap;

use regex::{NoExpand, Regex};
use toml::Table;

use crate::error::{PluginError, Result};
use crate::plugin::host_fns::{AdminSurface, CacheStore, FlashKind, TemplateStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    rows: HashMap<String, Table>,
}

impl MemoryCache {
    pub fn contains(&self, namespace: &str) -> bool {
        self.rows.contains_key(namespace)
    }
}

impl CacheStore for MemoryCache {
    fn read(&self, namespace: &str) -> Result<Option<Table>> {
        Ok(self.rows.get(namespace).cloned())
    }

    fn update(&mut self, namespace: &str, entries: Table) -> Result<()> {
        self.rows.insert(namespace.to_string(), entries);
        Ok(())
    }

    fn delete(&mut self, namespace: &str) -> Result<()> {
        self.rows.remove(namespace);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryTemplates {
    templates: HashMap<String, String>,
}

impl MemoryTemplates {
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }
}

impl TemplateStore for MemoryTemplates {
    fn find_replace(&mut self, template: &str, find: &Regex, replacement: &str) -> Result<bool> {
        let text = self
            .templates
            .get_mut(template)
            .ok_or_else(|| PluginError::Template {
                template: template.to_string(),
                reason: "no such template".to_string(),
            })?;

        let replaced = find.replace_all(text, NoExpand(replacement)).into_owned();
        let changed = replaced != *text;
        *text = replaced;
        Ok(changed)
    }
}

/// Admin surface that records what the plugin asked for.
#[derive(Debug, Default, Clone)]
pub struct RecordingAdmin {
    pub flashes: Vec<(String, FlashKind)>,
    pub redirects: Vec<String>,
}

impl AdminSurface for RecordingAdmin {
    fn flash_message(&mut self, message: &str, kind: FlashKind) {
        self.flashes.push((message.to_string(), kind));
    }

    fn redirect(&mut self, url: &str) {
        self.redirects.push(url.to_string());
    }
}
