//! Xcode `.xcconfig` reader.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Key holding the minimum iOS version in the shared iOS xcconfig.
pub const DEPLOYMENT_TARGET: &str = "DEPLOYMENT_TARGET";

/// Settings from an `.xcconfig` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XcConfig {
    settings: HashMap<String, String>,
}

impl XcConfig {
    /// Parse `KEY = VALUE` assignments. Later assignments win.
    ///
    /// `//` comments, `#include` directives and lines without `=` are skipped.
    pub fn parse(text: &str) -> Self {
        let mut settings = HashMap::new();

        for line in text.lines() {
            let line = match line.find("//") {
                Some(idx) => &line[..idx],
                None => line,
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let value = value.trim().trim_end_matches(';').trim();
            settings.insert(key.to_string(), value.to_string());
        }

        Self { settings }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn deployment_target(&self) -> Option<&str> {
        self.get(DEPLOYMENT_TARGET)
    }
}
