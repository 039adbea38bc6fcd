//! End-to-end tests: synthetic study data → figures on disk.

use std::fs;

use cp_plots::config::StudyConfig;
use cp_plots::data::model::MeshKind;
use cp_plots::pipeline::{load_study, render_study, run, StudyData};
use cp_plots::sample::write_sample_study;
use tempfile::tempdir;

const EXPECTED_FIGURES: [&str; 8] = [
    "cp_p1_a0_25.png",
    "cp_p1_a0_75.png",
    "cp_p1_a20_25.png",
    "cp_p1_a20_75.png",
    "cp_p2_a0_25.png",
    "cp_p2_a0_75.png",
    "cp_p2_a20_25.png",
    "cp_p2_a20_75.png",
];

fn study_in(root: &std::path::Path) -> StudyConfig {
    StudyConfig::default().rooted_at(root)
}

/// Fixed sample inputs produce the eight expected figures.
#[test]
fn test_run_writes_all_figures() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    let written = write_sample_study(&config, 42).unwrap();
    assert_eq!(written.len(), 1 + 8 * 3);

    let summary = run(&config).unwrap();

    assert_eq!(summary.series_loaded, 24);
    let names: Vec<String> = summary
        .figures
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, EXPECTED_FIGURES);

    for name in EXPECTED_FIGURES {
        let path = dir.path().join("plots_Cp").join(name);
        assert!(path.is_file(), "missing {}", path.display());
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (700, 600));
    }
}

#[test]
fn test_loaded_series_are_sorted_and_unitless() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    write_sample_study(&config, 7).unwrap();

    let data = load_study(&config).unwrap();
    assert_eq!(data.group.len(), 8);
    for meshes in data.group.cases.values() {
        assert_eq!(meshes.len(), MeshKind::ALL.len());
        for series in meshes.values() {
            assert!(series.x.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(series.x.first().copied(), Some(0.0));
            assert_eq!(series.x.last().copied(), Some(1.0));
        }
    }

    // Airfoil chord spans x/c 0..1 after scaling.
    let max_x = data.airfoil.x.iter().copied().fold(f64::MIN, f64::max);
    assert!((max_x - 1.0).abs() < 1e-9);
}

#[test]
fn test_missing_export_aborts_run() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    write_sample_study(&config, 42).unwrap();

    let victim = dir.path().join("data/mosaic/cp_p2_a0_75.xy");
    fs::remove_file(&victim).unwrap();

    let err = run(&config).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("cp_p2_a0_75"), "{chain}");
    // Nothing is rendered when loading fails.
    assert!(!dir.path().join("plots_Cp").exists());
}

#[test]
fn test_malformed_export_reports_line() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    write_sample_study(&config, 42).unwrap();

    let victim = dir.path().join("data/structured/cp_p1_a0_25.xy");
    let text = fs::read_to_string(&victim).unwrap();
    let broken = text.replacen('\t', "\tnot-a-number ", 1);
    fs::write(&victim, broken).unwrap();

    let err = run(&config).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("cp_p1_a0_25.xy:5"), "{chain}");
}

#[test]
fn test_config_file_overrides_matrix() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("cp_plots.toml"),
        "angles_of_attack = [20]\nspan_locations = [75]\n\n[figure]\nwidth = 350\nheight = 300\n",
    )
    .unwrap();
    let config = StudyConfig::load_or_default(&dir.path().join("cp_plots.toml"))
        .unwrap()
        .rooted_at(dir.path());
    write_sample_study(&config, 3).unwrap();

    let summary = run(&config).unwrap();
    assert_eq!(summary.figures.len(), 2);
    let img = image::open(&summary.figures[0]).unwrap();
    assert_eq!((img.width(), img.height()), (350, 300));
}

/// Writing the Cp bounds the other way round must not mirror the airfoil.
#[test]
fn test_reversed_axis_keeps_airfoil_orientation() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    write_sample_study(&config, 42).unwrap();

    let mut reversed = config.clone();
    reversed.y_axis = [1.1, -1.6];

    let normal = load_study(&config).unwrap();
    let flipped = load_study(&reversed).unwrap();
    assert_eq!(normal.airfoil, flipped.airfoil);

    // Upper surface maps to negative Cp coordinates (suction side).
    let min_y = normal.airfoil.y.iter().copied().fold(f64::MAX, f64::min);
    assert!(min_y < 0.0);

    let summary = run(&reversed).unwrap();
    assert_eq!(summary.figures.len(), 8);
}

#[test]
fn test_empty_airfoil_aborts_run() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    write_sample_study(&config, 42).unwrap();
    fs::write(&config.airfoil_file, "X,Y,Z\n").unwrap();

    let err = run(&config).unwrap_err();
    assert!(format!("{err:#}").contains("no airfoil points"));
}

#[test]
fn test_render_without_cases_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = study_in(dir.path());
    let data = StudyData {
        airfoil: Default::default(),
        group: Default::default(),
    };

    let figures = render_study(&config, &data).unwrap();
    assert!(figures.is_empty());
    assert!(!dir.path().join("plots_Cp").exists());
}
