//! eegview Store - Persistence adapters
//!
//! The page's durable state (theme preference, analysis settings, and the
//! dataset/result snapshots that let separate invocations share a session)
//! lives behind explicit store ports. The JSON adapters write fixed file
//! names under a discovered `.eegview/` profile directory; the in-memory
//! adapters back tests.

pub mod json;
pub mod memory;
pub mod models;
pub mod ports;
pub mod profile;

pub use json::JsonProfileStore;
pub use memory::MemoryStore;
pub use models::{DatasetSnapshot, ResultSnapshot};
pub use ports::{SettingsStore, SnapshotStore, ThemeStore};
pub use profile::Profile;
