//! zonegrid.toml configuration parser.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonegridConfig {
    pub output: OutputConfig,
    pub layout: LayoutConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    /// Graphviz executable used for png/svg output.
    pub graphviz: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("diagrams"),
            format: OutputFormat::Png,
            graphviz: "dot".to_string(),
        }
    }
}

/// Graph-level layout attributes handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: String,
    pub nodesep: String,
    pub ranksep: String,
    pub splines: String,
    /// Only the first N zones of a region take part in placement.
    pub max_zones: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: "TB".to_string(),
            nodesep: "1.0".to_string(),
            ranksep: "5".to_string(),
            splines: "ortho".to_string(),
            max_zones: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
    /// Filename suffix identifying submission files.
    pub suffix: String,
    pub az_map: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            suffix: "_input_data.json".to_string(),
            az_map: PathBuf::from("az_map.json"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Dot,
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Whether producing this format needs the Graphviz executable.
    pub fn needs_graphviz(self) -> bool {
        !matches!(self, OutputFormat::Dot)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" => Ok(OutputFormat::Dot),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

impl ZonegridConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.layout.max_zones == Some(0) {
            return Err(ConfigError::ZeroMaxZones);
        }
        Ok(())
    }

    /// Read `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZonegridConfig::default();
        assert_eq!(config.layout.direction, "TB");
        assert_eq!(config.layout.ranksep, "5");
        assert_eq!(config.layout.splines, "ortho");
        assert_eq!(config.output.format, OutputFormat::Png);
        assert_eq!(config.input.suffix, "_input_data.json");
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[output]
format = "svg"

[layout]
max_zones = 4
"#;
        let config: ZonegridConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, OutputFormat::Svg);
        assert_eq!(config.output.graphviz, "dot");
        assert_eq!(config.layout.max_zones, Some(4));
        assert_eq!(config.layout.nodesep, "1.0");
    }

    #[test]
    fn test_parse_empty() {
        let config: ZonegridConfig = toml::from_str("").unwrap();
        assert_eq!(config.output.dir, PathBuf::from("diagrams"));
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            "jpeg".parse::<OutputFormat>(),
            Err(ConfigError::UnknownFormat(_))
        ));
        assert_eq!("dot".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
    }

    #[test]
    fn test_zero_max_zones_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("zonegrid.toml");
        std::fs::write(&path, "[layout]\nmax_zones = 0\n").unwrap();
        let err = ZonegridConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroMaxZones));

        std::fs::write(&path, "[layout]\nmax_zones = 1\n").unwrap();
        assert_eq!(ZonegridConfig::load(Some(&path)).unwrap().layout.max_zones, Some(1));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ZonegridConfig::load(Some(Path::new("/nonexistent/zonegrid.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
