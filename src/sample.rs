//! Synthetic study data in the solver's export formats.
//!
//! Writes an airfoil outline CSV and one Fluent `.xy` export per mesh and
//! case, laid out where [`StudyConfig`] expects them. The Cp distributions
//! follow a crude thin-airfoil shape with per-mesh noise, which is enough to
//! exercise loading, normalisation and plotting end to end.

use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::config::StudyConfig;
use crate::data::model::{DataKey, MeshKind, Phase};

/// Chord of the stored airfoil outline.
const AIRFOIL_CHORD_MM: f64 = 1000.0;
const THICKNESS: f64 = 0.14;
const MAX_CAMBER: f64 = 0.04;
const CAMBER_POSITION: f64 = 0.4;
const OUTLINE_POINTS: usize = 61;

/// Dimensional chord of the exported wing section.
const SECTION_CHORD_M: f64 = 0.3;

/// Seeded Gaussian noise for the synthetic exports (splitmix64 stream).
struct Noise {
    state: u64,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean normal sample (Box-Muller).
    fn normal(&mut self, std_dev: f64) -> f64 {
        let u1 = self.unit().max(f64::MIN_POSITIVE);
        let u2 = self.unit();
        std_dev * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Cosine-spaced x/c stations from the leading to the trailing edge.
fn cosine_stations(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 * (1.0 - (PI * i as f64 / (n - 1) as f64).cos()))
        .collect()
}

/// NACA 4-digit half thickness with a closed trailing edge.
fn half_thickness(xc: f64) -> f64 {
    5.0 * THICKNESS
        * (0.2969 * xc.sqrt() - 0.1260 * xc - 0.3516 * xc.powi(2) + 0.2843 * xc.powi(3)
            - 0.1036 * xc.powi(4))
}

fn camber_line(xc: f64) -> f64 {
    let (m, p) = (MAX_CAMBER, CAMBER_POSITION);
    if xc < p {
        m / (p * p) * (2.0 * p * xc - xc * xc)
    } else {
        m / ((1.0 - p) * (1.0 - p)) * ((1.0 - 2.0 * p) + 2.0 * p * xc - xc * xc)
    }
}

/// Closed outline in millimetres: upper surface trailing edge → leading
/// edge, then lower surface back to the trailing edge.
pub fn airfoil_outline() -> Vec<(f64, f64)> {
    let stations = cosine_stations(OUTLINE_POINTS);
    let upper = stations
        .iter()
        .rev()
        .map(|&xc| (xc, camber_line(xc) + half_thickness(xc)));
    let lower = stations
        .iter()
        .skip(1)
        .map(|&xc| (xc, camber_line(xc) - half_thickness(xc)));
    upper
        .chain(lower)
        .map(|(xc, yc)| (xc * AIRFOIL_CHORD_MM, yc * AIRFOIL_CHORD_MM))
        .collect()
}

// ---------------------------------------------------------------------------
// Pressure distributions
// ---------------------------------------------------------------------------

/// Points per surface and noise level of each mesh's export.
fn mesh_resolution(mesh: MeshKind) -> (usize, f64) {
    match mesh {
        MeshKind::Unstructured => (45, 0.03),
        MeshKind::Mosaic => (60, 0.015),
        MeshKind::Structured => (80, 0.008),
    }
}

/// Noise-free Cp at `xc` on one surface.
pub fn model_cp(key: &DataKey, xc: f64, upper: bool) -> f64 {
    let alpha = key.aoa_deg as f64;
    let span = key.span_pct as f64 / 100.0;
    let phase_factor = match key.phase {
        Phase::OnePhase => 1.0,
        Phase::TwoPhase => 0.9,
    };
    // Loading drops towards the tip.
    let loading = (0.12 + 0.03 * alpha) * (1.0 - 0.4 * span * span) * phase_factor;

    let stagnation = (-xc / 0.015).exp();
    let thickness = -0.4 * (1.0 - xc) * (xc / (xc + 0.02)).sqrt();
    let lift = loading * ((1.0 - xc) / (xc + 0.05)).sqrt();

    let cp = if upper {
        stagnation + thickness - lift
    } else {
        stagnation + 0.6 * thickness + 0.5 * lift
    };
    cp.clamp(-1.55, 1.0)
}

/// Text of one Fluent `.xy` export for `key` on `mesh`.
fn fluent_xy_text(key: &DataKey, mesh: MeshKind, noise: &mut Noise) -> String {
    let (n, sigma) = mesh_resolution(mesh);
    // Leading edge moves aft along the span (swept wing).
    let x_le = 0.05 + 0.1 * key.span_pct as f64 / 100.0;

    let mut out = String::new();
    out.push_str("(title \"Pressure Coefficient\")\n");
    out.push_str("(labels \"Position\" \"Pressure Coefficient\")\n");
    out.push('\n');
    let _ = writeln!(out, "((xy/key/label \"wing-{}\")", key.span_pct);

    // Solver order: whole upper surface, then the lower one.
    for upper in [true, false] {
        for xc in cosine_stations(n) {
            let cp = model_cp(key, xc, upper) + noise.normal(sigma);
            let x = x_le + SECTION_CHORD_M * xc;
            let _ = writeln!(out, "{x:.6}\t{cp:.6}");
        }
    }
    out.push_str(")\n");
    out
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn write_airfoil_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["X", "Y", "Z"])?;
    for (x, y) in airfoil_outline() {
        writer.write_record([format!("{x:.4}"), format!("{y:.4}"), "0".to_string()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing airfoil CSV: {}", e.error()))?;
    write_file(path, &bytes)
}

/// Write a complete synthetic data tree for `config`. Returns the written
/// files, airfoil first.
pub fn write_sample_study(config: &StudyConfig, seed: u64) -> Result<Vec<PathBuf>> {
    let mut noise = Noise::new(seed);
    let mut written = Vec::new();

    write_airfoil_csv(&config.airfoil_file)?;
    written.push(config.airfoil_file.clone());

    for key in config.data_keys() {
        for mesh in MeshKind::ALL {
            let path = config.xy_path(mesh, &key);
            write_file(&path, fluent_xy_text(&key, mesh, &mut noise).as_bytes())?;
            written.push(path);
        }
    }

    log::info!("Wrote {} sample files", written.len());
    Ok(written)
}
