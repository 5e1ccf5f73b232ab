//! Portfolio Common Library
//!
//! CLIとWeb(WASM)で共有されるカタログ・絞り込み・閲覧数カウンタ

pub mod catalog;
pub mod config;
pub mod consent;
pub mod error;
pub mod events;
pub mod filter;
pub mod labels;
pub mod modal;
pub mod portfolio;
pub mod render;
pub mod schedule;
pub mod stats;
pub mod types;
pub mod views;

pub use catalog::{Catalog, TechnologyTag, ValidationIssue};
pub use config::SiteConfig;
pub use consent::{AnalyticsConsent, ConsentStore};
pub use error::{Error, Result};
pub use events::AnalyticsEvent;
pub use filter::{CatalogFilter, CategoryFilter, FilterCommand, FilterState, FilterStats, Page, StatusFilter};
pub use modal::{ModalPresenter, OpenedProject, ProjectDetail};
pub use portfolio::Portfolio;
pub use render::{escape_html, CatalogRenderer, PageSummary, PageView, ProjectCard};
pub use schedule::{Clock, ManualClock, RenderScheduler};
pub use stats::SiteStats;
pub use types::{Category, ProjectId, ProjectRecord, Status};
pub use views::{KeyValueStore, MemoryStore, ViewCounter, ViewCounts};
