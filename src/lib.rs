//! Inline [Heroicons](https://heroicons.com) for forum posts.
//!
//! Authors write `[heroicon='arrow-up']`; at render time the tag becomes
//! `<span class="t-code-heroicon"><svg …/></span>` read from the shipped icon
//! set. Everything the forum engine owns (hooks, cache, templates, admin
//! panel) is reached through the traits in [`plugin::host_fns`].

pub mod error;
pub mod host;
pub mod model;
pub mod plugin;

pub use error::{PluginError, Result};
pub use model::config::AppConfig;
pub use plugin::{IconExpander, PluginManager};
