//! Core library modules for the sidik application.
//!
//! Everything with domain logic lives here: the workbook extractor, the
//! attendance statistics and score calculators, the import / vote-bridge /
//! ranking-engine pipelines, and the annual report exporter. Commands under
//! `crate::commands` are thin wrappers over these modules.

pub mod annual;
pub mod bridge;
pub mod config;
pub mod data_storage;
pub mod engine;
pub mod import;
pub mod messages;
pub mod outcome;
pub mod ranking;
pub mod score;
pub mod stats;
pub mod view;
pub mod workbook;
