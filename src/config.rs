//! Study configuration.
//!
//! Every setting has the default of the mesh study, so the tool runs without
//! any file. An optional `cp_plots.toml` in the working directory overrides
//! individual values:
//!
//! ```toml
//! output_dir = "plots_Cp"
//! y_axis = [-2.0, 1.2]
//! angles_of_attack = [0, 10, 20]
//!
//! [figure]
//! width = 1400
//! height = 1200
//!
//! [styles.mosaic]
//! legend = "Mosaic (poly)"
//! color = "darkorange"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::color::StyleMap;
use crate::data::model::{DataKey, MeshKind, Trace};
use crate::data::study;

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "cp_plots.toml";

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    /// Root of the per-mesh export directories.
    pub data_dir: PathBuf,
    /// Where the figures are written.
    pub output_dir: PathBuf,
    /// Airfoil outline CSV.
    pub airfoil_file: PathBuf,
    /// Cp axis limits `[lower, upper]`; drawn inverted.
    pub y_axis: [f64; 2],
    pub angles_of_attack: Vec<u32>,
    pub span_locations: Vec<u32>,
    pub figure: FigureConfig,
    pub styles: StylesConfig,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("plots_Cp"),
            airfoil_file: PathBuf::from("data/airfoil/eppler_420.csv"),
            y_axis: [-1.6, 1.1],
            angles_of_attack: vec![0, 20],
            span_locations: vec![25, 75],
            figure: FigureConfig::default(),
            styles: StylesConfig::default(),
        }
    }
}

/// Figure geometry in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    /// Stroke width of the airfoil outline.
    pub line_width: u32,
    /// Radius of the scatter markers.
    pub marker_size: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        // 7 x 6 in at 100 dpi
        Self {
            width: 700,
            height: 600,
            font_size: 16,
            line_width: 2,
            marker_size: 3,
        }
    }
}

/// Optional per-trace overrides; unset fields fall back to the trace's
/// built-in legend and colour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub legend: Option<String>,
    /// SVG/CSS colour name, e.g. `royalblue`.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StylesConfig {
    pub airfoil: StyleConfig,
    pub unstructured: StyleConfig,
    pub mosaic: StyleConfig,
    pub structured: StyleConfig,
}

impl StylesConfig {
    pub fn get(&self, trace: Trace) -> &StyleConfig {
        match trace {
            Trace::Airfoil => &self.airfoil,
            Trace::Mesh(MeshKind::Unstructured) => &self.unstructured,
            Trace::Mesh(MeshKind::Mosaic) => &self.mosaic,
            Trace::Mesh(MeshKind::Structured) => &self.structured,
        }
    }
}

impl StudyConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            log::info!("Using configuration from {}", path.display());
            Self::from_file(path)
        } else {
            log::debug!("No {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Resolve relative paths against `root`. Absolute paths are kept.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        self.data_dir = root.join(&self.data_dir);
        self.output_dir = root.join(&self.output_dir);
        self.airfoil_file = root.join(&self.airfoil_file);
        self
    }

    /// Reject settings no figure can be drawn with.
    pub fn validate(&self) -> Result<()> {
        let [lower, upper] = self.y_axis;
        if !lower.is_finite() || !upper.is_finite() || lower == upper {
            bail!("y_axis bounds must be finite and distinct, got [{lower}, {upper}]");
        }
        if self.figure.width == 0 || self.figure.height == 0 {
            bail!(
                "figure size must be non-zero, got {}x{}",
                self.figure.width,
                self.figure.height
            );
        }
        if self.angles_of_attack.is_empty() || self.span_locations.is_empty() {
            bail!("angles_of_attack and span_locations must not be empty");
        }
        StyleMap::from_config(&self.styles)?;
        Ok(())
    }

    /// Cp axis limits ordered `[lower, upper]`, whichever way round `y_axis`
    /// was written. The lower bound is drawn at the top.
    pub fn cp_limits(&self) -> [f64; 2] {
        let [a, b] = self.y_axis;
        [a.min(b), a.max(b)]
    }

    /// Every case of the study, in figure order.
    pub fn data_keys(&self) -> Vec<DataKey> {
        study::data_keys(&self.angles_of_attack, &self.span_locations)
    }

    /// Input export of `mesh` for `key`: `<data_dir>/<mesh>/<key>.xy`.
    pub fn xy_path(&self, mesh: MeshKind, key: &DataKey) -> PathBuf {
        self.data_dir
            .join(mesh.dir_name())
            .join(format!("{}.xy", key.stem()))
    }

    /// Output figure for `key`: `<output_dir>/<key>.png`.
    pub fn figure_path(&self, key: &DataKey) -> PathBuf {
        self.output_dir.join(format!("{}.png", key.stem()))
    }
}
