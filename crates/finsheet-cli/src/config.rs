//! TOML configuration file
//!
//! ```toml
//! hidden_periods = ["2023-12-31"]
//!
//! [display]
//! negative_format = "minus"
//! display_scale = "thousands"
//! date_format = "MM/DD/YY"
//! decimal_places = 1
//!
//! [commit]
//! round_to_cents = true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finsheet::{CommitPolicy, DisplayOptions, GridOptions, MAX_DECIMAL_PLACES};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayOptions,
    pub commit: CommitPolicy,
    /// Period end dates to start hidden
    pub hidden_periods: Vec<NaiveDate>,
}

impl Config {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config '{}'", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        anyhow::ensure!(
            config.display.decimal_places <= MAX_DECIMAL_PLACES,
            "decimal_places must be at most {}",
            MAX_DECIMAL_PLACES
        );
        Ok(config)
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            display: self.display,
            commit: self.commit,
        }
    }
}
