// Configuration module

mod builder;

pub use builder::{configure, LabelConfig, LabelConfigBuilder, DEFAULT_LABEL_OFFSET, DEFAULT_QUALITY};

use base64::Engine as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LabelError;
use crate::label::Position;

/// Named label options as they appear in YAML/JSON documents.
///
/// Every field is optional; anything left unset takes the default from
/// [`LabelConfigBuilder`]. Keys this struct does not know are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Base64-encoded image bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file_quality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_offset_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_offset_y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_padding: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_border_thickness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_background_color: Option<String>,
}

/// A position given either by name or by its legacy numeric index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionValue {
    Index(i64),
    Name(String),
}

impl PositionValue {
    pub fn resolve(&self) -> Result<Position, LabelError> {
        match self {
            PositionValue::Index(index) => Position::from_index(*index),
            PositionValue::Name(name) => name.parse(),
        }
    }
}

impl From<Position> for PositionValue {
    fn from(position: Position) -> Self {
        PositionValue::Name(position.as_str().to_string())
    }
}

impl LabelOptions {
    /// Parse YAML after substituting `${VAR}` references from the environment.
    ///
    /// A referenced variable that is not set is an error.
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, LabelError> {
        let substituted = substitute_env(yaml)?;
        serde_yaml::from_str(&substituted)
            .map_err(|e| LabelError::Config(format!("invalid label options: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            LabelError::Config(format!("failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, LabelError> {
        serde_json::from_value(value)
            .map_err(|e| LabelError::Config(format!("invalid label options: {}", e)))
    }

    /// Decoded `fileContent`, if set.
    pub fn decoded_file_content(&self) -> Result<Option<Vec<u8>>, LabelError> {
        let Some(content) = self.file_content.as_deref() else {
            return Ok(None);
        };
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        base64::engine::general_purpose::STANDARD
            .decode(content)
            .map(Some)
            .map_err(|e| LabelError::invalid_param("fileContent", format!("invalid base64: {}", e)))
    }

    /// Fields set in `overrides` replace the ones in `self`.
    ///
    /// `filePath` and `fileContent` are replaced as a pair: a source given
    /// in `overrides` always wins over either source in `self`.
    pub fn merge(self, overrides: LabelOptions) -> LabelOptions {
        let (file_path, file_content) =
            if overrides.file_path.is_some() || overrides.file_content.is_some() {
                (overrides.file_path, overrides.file_content)
            } else {
                (self.file_path, self.file_content)
            };

        LabelOptions {
            text: overrides.text.or(self.text),
            position: overrides.position.or(self.position),
            position_x: overrides.position_x.or(self.position_x),
            position_y: overrides.position_y.or(self.position_y),
            font_size: overrides.font_size.or(self.font_size),
            font_color: overrides.font_color.or(self.font_color),
            background_color: overrides.background_color.or(self.background_color),
            format: overrides.format.or(self.format),
            file_path,
            file_content,
            target_file_quality: overrides.target_file_quality.or(self.target_file_quality),
            label_offset_x: overrides.label_offset_x.or(self.label_offset_x),
            label_offset_y: overrides.label_offset_y.or(self.label_offset_y),
            box_padding: overrides.box_padding.or(self.box_padding),
            box_border_thickness: overrides.box_border_thickness.or(self.box_border_thickness),
            box_border_color: overrides.box_border_color.or(self.box_border_color),
            box_background_color: overrides.box_background_color.or(self.box_background_color),
        }
    }
}

fn substitute_env(text: &str) -> Result<String, LabelError> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| LabelError::Config(e.to_string()))?;

    // Check that all referenced environment variables exist
    for caps in re.captures_iter(text) {
        let var_name = &caps[1];
        std::env::var(var_name).map_err(|_| {
            LabelError::Config(format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            ))
        })?;
    }

    let substituted = re.replace_all(text, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });
    Ok(substituted.into_owned())
}
