//! Application configuration.
//!
//! Stored as JSON in the platform data directory. The discipline category id
//! lives here rather than as a constant scattered through the pipelines: it
//! is resolved once per command invocation and passed down. The export
//! section configures where the monthly SIKEP workbooks live and the file
//! prefix they are named with.

use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default discipline category id, matching the seeded production data.
const DEFAULT_CATEGORY_ID: i64 = 3;
/// Default monthly workbook prefix: `<prefix>_<MonthName>_<year>.xlsx`.
pub const DEFAULT_FILE_PREFIX: &str = "PA Penajam";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExportConfig {
    /// Directory scanned for monthly attendance workbooks.
    pub source_dir: PathBuf,
    /// File-name prefix of the monthly workbooks.
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            source_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Category whose criteria receive the synthetic discipline votes.
    pub discipline_category_id: i64,
    /// Voter the synthetic votes are attributed to; `None` means the first
    /// admin or superadmin found at run time.
    pub default_voter_id: Option<i64>,
    pub export: Option<ExportConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            discipline_category_id: DEFAULT_CATEGORY_ID,
            default_voter_id: None,
            export: None,
        }
    }
}

impl Config {
    pub fn read() -> Result<Self> {
        let path = Self::file_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }
        let file = File::open(&path)?;
        let config = serde_json::from_reader(file).map_err(|_| crate::msg_error_anyhow!(Message::ConfigParseError))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::file_path()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn delete() -> Result<()> {
        let path = Self::file_path()?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        let discipline_category_id: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryId.to_string())
            .default(current.discipline_category_id)
            .interact_text()?;

        let voter: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDefaultVoter.to_string())
            .default(current.default_voter_id.unwrap_or(0))
            .interact_text()?;

        let export_default = current.export.clone().unwrap_or_default();
        let source_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportDir.to_string())
            .default(export_default.source_dir.display().to_string())
            .interact_text()?;
        let file_prefix: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportPrefix.to_string())
            .default(export_default.file_prefix)
            .interact_text()?;

        Ok(Config {
            discipline_category_id,
            default_voter_id: (voter > 0).then_some(voter),
            export: Some(ExportConfig {
                source_dir: PathBuf::from(source_dir),
                file_prefix,
            }),
        })
    }

    fn file_path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME).map_err(|e| anyhow::anyhow!("{}", e))
    }
}
