pub mod audit;
pub mod config;
pub mod format;
pub mod fs;
pub mod prune;
pub mod routes;
pub mod runner;
pub mod search;
pub mod utils;

// Re-export key items for convenience
pub use audit::{AuditReport, run_audit};
pub use config::{AuditConfig, PawprintConfig, SearchConfig, SearchFormat};
pub use prune::{PruneError, PruneOptions, run_prune};
pub use search::{Catalog, Document, SearchOutcome, search};
