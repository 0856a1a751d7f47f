//! Host platform extension points the plugin calls into.
//!
//! The forum engine owns hook dispatch, the keyed cache, template storage and
//! the admin panel. The plugin only sees these traits; `crate::host` ships
//! in-memory and file-backed implementations.

use regex::Regex;
use toml::Table;

use crate::error::Result;

/// Name of the extension point that rewrites post bodies before display.
pub const PARSE_MESSAGE_HOOK: &str = "parse_message";

/// Keyed cache store. Each namespace holds one table shared by sibling plugins.
pub trait CacheStore {
    fn read(&self, namespace: &str) -> Result<Option<Table>>;

    fn update(&mut self, namespace: &str, entries: Table) -> Result<()>;

    /// Drop the namespace row from the backing store entirely.
    fn delete(&mut self, namespace: &str) -> Result<()>;
}

/// Shared template storage, edited through regex find/replace.
pub trait TemplateStore {
    /// Replace every match of `find` in the named template with the literal
    /// `replacement` (no `$` expansion). Returns whether the text changed.
    fn find_replace(&mut self, template: &str, find: &Regex, replacement: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
}

/// Admin panel side effects: one-shot notices and redirects.
pub trait AdminSurface {
    fn flash_message(&mut self, message: &str, kind: FlashKind);

    fn redirect(&mut self, url: &str);
}

/// Read access to the incoming admin request's query parameters.
pub trait RequestInput {
    fn get_input(&self, key: &str) -> Option<&str>;
}

pub type MessageHandler = Box<dyn Fn(&str) -> String>;

/// Hook registration on the host's plugin system.
pub trait HookRegistry {
    fn add_hook(&mut self, hook: &str, handler: MessageHandler);
}

/// Where the current request is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestContext {
    #[default]
    Frontend,
    AdminPanel,
}
