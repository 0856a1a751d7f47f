use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use regex::{NoExpand, Regex};
use toml::Table;

use crate::error::{PluginError, Result};
use crate::plugin::host_fns::{CacheStore, TemplateStore};

/// Cache rows as `<namespace>.toml` files in one directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn row_path(&self, namespace: &str) -> Result<PathBuf> {
        if !is_plain_name(namespace) {
            return Err(PluginError::Cache {
                namespace: namespace.to_string(),
                reason: "namespace is not a plain file name".to_string(),
            });
        }
        Ok(self.root.join(format!("{namespace}.toml")))
    }
}

impl CacheStore for FileCache {
    fn read(&self, namespace: &str) -> Result<Option<Table>> {
        let path = self.row_path(namespace)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        raw.parse::<Table>()
            .map(Some)
            .map_err(|source| PluginError::Parse { path, source })
    }

    fn update(&mut self, namespace: &str, entries: Table) -> Result<()> {
        let path = self.row_path(namespace)?;
        fs::create_dir_all(&self.root)?;
        fs::write(path, toml::to_string(&entries)?)?;
        Ok(())
    }

    fn delete(&mut self, namespace: &str) -> Result<()> {
        match fs::remove_file(self.row_path(namespace)?) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Templates as `<name>.html` files in one directory.
#[derive(Debug, Clone)]
pub struct FileTemplates {
    root: PathBuf,
}

impl FileTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn template_path(&self, name: &str) -> Result<PathBuf> {
        if !is_plain_name(name) {
            return Err(PluginError::Template {
                template: name.to_string(),
                reason: "template name is not a plain file name".to_string(),
            });
        }
        Ok(self.root.join(format!("{name}.html")))
    }
}

impl TemplateStore for FileTemplates {
    fn find_replace(&mut self, template: &str, find: &Regex, replacement: &str) -> Result<bool> {
        let path = self.template_path(template)?;
        let text = fs::read_to_string(&path).map_err(|err| PluginError::Template {
            template: template.to_string(),
            reason: format!("{}: {err}", path.display()),
        })?;

        let replaced = find.replace_all(&text, NoExpand(replacement));
        if replaced == text {
            return Ok(false);
        }

        fs::write(&path, replaced.as_bytes())?;
        Ok(true)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
}
