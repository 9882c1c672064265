//! ragfolio-index
//!
//! The offline index builder: content sources for the structured profile and
//! the project documents, TF-IDF model computation over all synthesized
//! chunks, and the filesystem store for the persisted artifact. Runs as a
//! batch step, never during request handling.

pub mod builder;
pub mod profile;
pub mod projects;
pub mod store;

pub use builder::IndexBuilder;
pub use profile::ProfileSource;
pub use projects::ProjectsSource;
pub use store::FsIndexStore;
