//! Portfolio CLI
//!
//! 組み込みカタログの閲覧・絞り込みと、ファイルに保存する閲覧数カウンタ

pub mod browse;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod file_store;
