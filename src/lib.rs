pub mod config;
pub mod error;
pub mod record;
pub mod text;
pub mod client;
pub mod list_parser;
pub mod extractor;
pub mod scraper;
pub mod resume_manager;
pub mod export;
pub mod delay_manager;
pub mod logger;

// Exporting types for convenience
pub use crate::client::{PageSource, SessionClient};
pub use crate::config::{RunConfig, SiteConfig};
pub use crate::error::{Result, ScrapeError};
pub use crate::extractor::Extractor;
pub use crate::list_parser::ListParser;
pub use crate::record::{ExhibitorRecord, FieldPatch, EXPORT_COLUMNS};
pub use crate::scraper::{Scraper, StopReason};
