use std::path::PathBuf;

use anyhow::Result;

use cp_plots::config::{StudyConfig, CONFIG_FILE_NAME};
use cp_plots::sample::write_sample_study;

const SEED: u64 = 42;

/// Writes a synthetic study data tree under the directory given as the first
/// argument (default: current directory).
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = StudyConfig::load_or_default(&root.join(CONFIG_FILE_NAME))?.rooted_at(&root);
    let written = write_sample_study(&config, SEED)?;

    println!(
        "Wrote {} files ({} cases) under {}",
        written.len(),
        config.data_keys().len(),
        config.data_dir.display()
    );
    Ok(())
}
