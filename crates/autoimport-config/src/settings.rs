//! Host-supplied settings (the editor's `autoimport` configuration section).

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};

/// Custom deserializer for flags that accepts both bool and string values.
/// Some hosts forward settings as strings (`"useSemiColon": "false"`).
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::String(s) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                    s
                ))),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoImportSettings {
    /// Secondary tsconfig-style file (relative to the workspace root) whose
    /// `paths`/`baseUrl` supersede the root `tsconfig.json`.
    pub file_with_ts_imports: Option<String>,
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub use_semi_colon: bool,
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub space_between_braces: bool,
    #[serde(deserialize_with = "deserialize_bool_or_string")]
    pub double_quotes: bool,
}

impl Default for AutoImportSettings {
    fn default() -> Self {
        AutoImportSettings {
            file_with_ts_imports: None,
            use_semi_colon: true,
            space_between_braces: true,
            double_quotes: false,
        }
    }
}

impl AutoImportSettings {
    /// Parse the settings section as JSON. A blank blob yields the defaults.
    pub fn from_json(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(source).context("failed to parse autoimport settings")
    }

    pub fn with_override_config_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_with_ts_imports = Some(file_name.into());
        self
    }

    /// Override filename, `None` when unset or blank.
    pub fn override_config_file(&self) -> Option<&str> {
        self.file_with_ts_imports
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
