//! Reference implementations of the host extension points.
//!
//! A real forum supplies its own cache, template tables and admin panel;
//! these back the command-line harness and the tests.

mod file;
mod hooks;
mod memory;
mod request;

pub use file::{FileCache, FileTemplates};
pub use hooks::Hooks;
pub use memory::{MemoryCache, MemoryTemplates, RecordingAdmin};
pub use request::AdminRequest;
