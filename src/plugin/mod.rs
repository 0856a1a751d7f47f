pub mod donation;
pub mod expander;
pub mod host_fns;
pub mod installer;
pub mod manager;
pub mod manifest;

pub use expander::IconExpander;
pub use manager::PluginManager;
