use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{AirfoilGeometry, Series};

/// Lines preceding the data block of a Fluent `.xy` export
/// (title, labels, blank line, `((xy/key/label ...)`).
pub const FLUENT_HEADER_LINES: usize = 4;

/// Closing `)` after the data block.
pub const FLUENT_FOOTER_LINES: usize = 1;

/// Airfoil coordinates are stored in millimetres against a 1000 mm chord.
pub const X_SCALE: f64 = 0.001;

/// Headroom so the scaled airfoil stays inside the Cp axis.
const AIRFOIL_Y_MARGIN: f64 = 1.1;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: CSV error", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: {found} lines is too short for the xy header and footer", .path.display())]
    TooShort { path: PathBuf, found: usize },
    #[error("{}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("{}: missing column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

// ---------------------------------------------------------------------------
// Fluent `.xy` exports
// ---------------------------------------------------------------------------

/// Read a Fluent `.xy` export into a series sorted ascending by x.
///
/// Layout:
///
/// ```text
/// (title "Pressure Coefficient")
/// (labels "Position" "Pressure Coefficient")
///
/// ((xy/key/label "wing-25")
/// 0.1234	-0.5612
/// ...
/// )
/// ```
pub fn read_fluent_xy(path: &Path) -> Result<Series, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fluent_xy(&text, path)
}

/// Parse the text of a Fluent `.xy` export. `origin` only labels errors.
pub fn parse_fluent_xy(text: &str, origin: &Path) -> Result<Series, LoadError> {
    let lines: Vec<&str> = text.lines().collect();

    // The footer is the last non-blank line; trailing newlines are common.
    let footer = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .filter(|&idx| idx + FLUENT_FOOTER_LINES > FLUENT_HEADER_LINES)
        .ok_or_else(|| LoadError::TooShort {
            path: origin.to_path_buf(),
            found: lines.len(),
        })?;
    let body_end = footer + 1 - FLUENT_FOOTER_LINES;

    let body = lines[FLUENT_HEADER_LINES..body_end].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut points = Vec::with_capacity(body_end - FLUENT_HEADER_LINES);
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        let line = FLUENT_HEADER_LINES
            + record.position().map(|p| p.line() as usize).unwrap_or(0);
        let malformed = |reason: String| LoadError::Malformed {
            path: origin.to_path_buf(),
            line,
            reason,
        };

        // Whitespace-only lines come through as a single empty field.
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            return Err(malformed(format!("expected 2 fields, found {}", record.len())));
        }
        let x = parse_value(&record[0]).map_err(&malformed)?;
        let y = parse_value(&record[1]).map_err(&malformed)?;
        points.push((x, y));
    }

    let mut series = Series::from_points(points);
    series.sort_by_x();
    log::debug!("{}: {} points", origin.display(), series.len());
    Ok(series)
}

fn parse_value(field: &str) -> Result<f64, String> {
    let value: f64 = field
        .parse()
        .map_err(|_| format!("'{field}' is not a number"))?;
    if !value.is_finite() {
        return Err(format!("'{field}' is not a finite number"));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Airfoil geometry
// ---------------------------------------------------------------------------

/// Y scale that maps the airfoil outline into the Cp axis. The bounds may be
/// given in either order; the scale is always negative so the upper surface
/// lands on the suction side at the top of the figure.
pub fn airfoil_y_scale(y_axis: [f64; 2]) -> f64 {
    let [a, b] = y_axis;
    (a.min(b) - a.max(b)) * X_SCALE * AIRFOIL_Y_MARGIN
}

/// Read the airfoil outline CSV (header row with at least `X` and `Y`).
///
/// X is scaled by [`X_SCALE`] and Y by [`airfoil_y_scale`]; the point order
/// of the file is kept.
pub fn read_airfoil(path: &Path, y_axis: [f64; 2]) -> Result<AirfoilGeometry, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    };
    let x_idx = column("X")?;
    let y_idx = column("Y")?;

    let y_scale = airfoil_y_scale(y_axis);
    let mut geometry = AirfoilGeometry::default();

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let field = |idx: usize| {
            let raw = record.get(idx).unwrap_or("");
            parse_value(raw).map_err(|reason| LoadError::Malformed {
                path: path.to_path_buf(),
                line,
                reason,
            })
        };
        geometry.x.push(field(x_idx)? * X_SCALE);
        geometry.y.push(field(y_idx)? * y_scale);
    }

    log::debug!("{}: {} airfoil points", path.display(), geometry.len());
    Ok(geometry)
}
