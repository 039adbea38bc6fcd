use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};

use crate::color::StyleMap;
use crate::config::StudyConfig;
use crate::data::loader::{read_airfoil, read_fluent_xy};
use crate::data::model::{AirfoilGeometry, DatasetGroup, MeshKind};
use crate::data::normalize::unitless;
use crate::render::FigureRenderer;

// ---------------------------------------------------------------------------
// Study data – everything loaded before the first figure is drawn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StudyData {
    pub airfoil: AirfoilGeometry,
    pub group: DatasetGroup,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Written figures, in study order.
    pub figures: Vec<PathBuf>,
    pub series_loaded: usize,
}

/// Load the airfoil and the normalised series of every mesh for every case.
pub fn load_study(config: &StudyConfig) -> Result<StudyData> {
    let airfoil = read_airfoil(&config.airfoil_file, config.cp_limits())
        .context("loading airfoil geometry")?;
    if airfoil.is_empty() {
        bail!("{} holds no airfoil points", config.airfoil_file.display());
    }

    let mut group = DatasetGroup::default();
    for key in config.data_keys() {
        for mesh in MeshKind::ALL {
            let path = config.xy_path(mesh, &key);
            let mut series =
                read_fluent_xy(&path).with_context(|| format!("loading {key} ({mesh})"))?;
            unitless(&mut series)
                .with_context(|| format!("normalising {}", path.display()))?;
            debug!("{key} {mesh}: {} points", series.len());
            group.insert(key, mesh, series);
        }
    }

    info!(
        "Loaded {} series for {} cases and {} airfoil points",
        group.series_count(),
        group.len(),
        airfoil.len()
    );
    Ok(StudyData { airfoil, group })
}

/// Render one figure per case into the output directory.
pub fn render_study(config: &StudyConfig, data: &StudyData) -> Result<Vec<PathBuf>> {
    if data.group.is_empty() {
        warn!("No cases loaded, nothing to plot");
        return Ok(Vec::new());
    }
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;

    let styles = StyleMap::from_config(&config.styles)?;
    let renderer = FigureRenderer::new(&config.figure, &styles, config.cp_limits());

    let mut figures = Vec::with_capacity(data.group.len());
    for key in config.data_keys() {
        let series = data
            .group
            .get(&key)
            .with_context(|| format!("no series loaded for {key}"))?;
        let path = config.figure_path(&key);
        renderer.render_png(&path, &key, &data.airfoil, series)?;
        info!("Wrote {}", path.display());
        figures.push(path);
    }
    Ok(figures)
}

/// Load, normalise and plot the whole study. The first error aborts the run.
pub fn run(config: &StudyConfig) -> Result<RunSummary> {
    let data = load_study(config)?;
    let figures = render_study(config, &data)?;
    Ok(RunSummary {
        figures,
        series_loaded: data.group.series_count(),
    })
}
