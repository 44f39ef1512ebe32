use std::fs;
use std::path::{Path, PathBuf};

use mbw_core::errors::{ErrorInfo, VizError};
use serde::{Deserialize, Serialize};

use crate::figures::FigureConfig;

/// Where inputs are read from, where artefacts go and how charts are sized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub results_dir: PathBuf,
    pub out_dir: PathBuf,
    pub figure: FigureConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            out_dir: PathBuf::from("plots"),
            figure: FigureConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_dirs(results_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            out_dir: out_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, VizError> {
        let config: Self = serde_yaml::from_str(raw).map_err(|err| {
            VizError::Io(ErrorInfo::new("mbw.config_parse", err.to_string()))
        })?;
        validate(&config)?;
        Ok(config)
    }
}

/// Reads a YAML configuration file; absent keys take their defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig, VizError> {
    let raw = fs::read_to_string(path).map_err(|err| VizError::io("mbw.config_read", path, err))?;
    PipelineConfig::from_yaml_str(&raw).map_err(|err| match err {
        VizError::Io(info) => VizError::Io(info.with_path(path)),
        other => other,
    })
}

fn validate(config: &PipelineConfig) -> Result<(), VizError> {
    let figure = &config.figure;
    let bad_font = figure.font_size.is_nan() || figure.font_size <= 0.0;
    if figure.width == 0 || figure.height == 0 || bad_font {
        return Err(VizError::Io(
            ErrorInfo::new("mbw.config_figure", "figure dimensions must be positive")
                .with_context("width", figure.width.to_string())
                .with_context("height", figure.height.to_string())
                .with_context("font_size", figure.font_size.to_string()),
        ));
    }
    Ok(())
}
