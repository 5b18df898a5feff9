//! cocorita
//!
//! In-memory translation tables keyed by source text, with `{{ name }}`
//! interpolation, JSON/YAML load and dump, and notifications for
//! auto-initialized translations.

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod interpolate;
pub mod table;
pub mod validate;

mod test_utils;

pub use config::{
    DefaultTarget,
    TableOptions,
};
pub use error::TableError;
pub use events::{
    KEY_INITIALIZED,
    KeyInitialized,
    SubscriptionId,
};
pub use format::Format;
pub use interpolate::Replacements;
pub use table::TranslationTable;
pub use validate::{
    Entries,
    Targets,
    ValidationError,
    validate_entries,
};
