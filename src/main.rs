use std::path::Path;

use anyhow::Result;
use log::info;

use cp_plots::config::{StudyConfig, CONFIG_FILE_NAME};
use cp_plots::pipeline;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = StudyConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?;
    let summary = pipeline::run(&config)?;

    info!(
        "Done: {} figures from {} series in {}",
        summary.figures.len(),
        summary.series_loaded,
        config.output_dir.display()
    );
    Ok(())
}
