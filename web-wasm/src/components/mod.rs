//! UIコンポーネント

pub mod consent_banner;
pub mod filter_bar;
pub mod header;
pub mod pagination;
pub mod project_grid;
pub mod project_modal;
