use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Series – one Cp distribution exported by the solver
// ---------------------------------------------------------------------------

/// A two-column series (one `.xy` export).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// Chordwise position; x/c in [0, 1] once normalised.
    pub x: Vec<f64>,
    /// Pressure coefficient – same length as `x`.
    pub y: Vec<f64>,
}

impl Series {
    /// Build a series from `(x, y)` pairs in the given order.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Series { x, y }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate `(x, y)` pairs in storage order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Sort rows ascending by x. Rows with equal x keep their file order.
    pub fn sort_by_x(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.x[a].total_cmp(&self.x[b]));

        self.x = order.iter().map(|&i| self.x[i]).collect();
        self.y = order.iter().map(|&i| self.y[i]).collect();
    }
}

// ---------------------------------------------------------------------------
// AirfoilGeometry – reference outline drawn behind the Cp data
// ---------------------------------------------------------------------------

/// Airfoil outline, already scaled into plot coordinates. File order is kept
/// so the outline is drawn as a closed contour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirfoilGeometry {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl AirfoilGeometry {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Study dimensions
// ---------------------------------------------------------------------------

/// Mesh generation strategy a series was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeshKind {
    Unstructured,
    Mosaic,
    Structured,
}

impl MeshKind {
    /// Every mesh, in legend order.
    pub const ALL: [MeshKind; 3] = [MeshKind::Unstructured, MeshKind::Mosaic, MeshKind::Structured];

    /// Sub-directory of the data root holding this mesh's exports.
    pub fn dir_name(self) -> &'static str {
        match self {
            MeshKind::Unstructured => "unstructured",
            MeshKind::Mosaic => "mosaic",
            MeshKind::Structured => "structured",
        }
    }
}

impl fmt::Display for MeshKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Flow model of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    OnePhase,
    TwoPhase,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::OnePhase, Phase::TwoPhase];

    /// Short code used in file names (`p1` / `p2`).
    pub fn code(self) -> &'static str {
        match self {
            Phase::OnePhase => "p1",
            Phase::TwoPhase => "p2",
        }
    }

    /// Human-readable label used in figure titles.
    pub fn label(self) -> &'static str {
        match self {
            Phase::OnePhase => "One-Phase",
            Phase::TwoPhase => "Two-Phase",
        }
    }
}

/// Composite key of one study case: phase × angle of attack × span station.
///
/// The derived ordering (phase, then angle, then station) is the order the
/// figures are produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataKey {
    pub phase: Phase,
    /// Angle of attack in degrees.
    pub aoa_deg: u32,
    /// Spanwise station in percent of the wing span.
    pub span_pct: u32,
}

impl DataKey {
    pub fn new(phase: Phase, aoa_deg: u32, span_pct: u32) -> Self {
        DataKey {
            phase,
            aoa_deg,
            span_pct,
        }
    }

    /// File stem shared by the inputs and the output figure, e.g. `cp_p1_a0_25`.
    pub fn stem(&self) -> String {
        format!("cp_{}_a{}_{}", self.phase.code(), self.aoa_deg, self.span_pct)
    }

    /// Figure title, e.g. `Cp at 25% of the wing (One-Phase, α=0°)`.
    pub fn title(&self) -> String {
        format!(
            "Cp at {}% of the wing ({}, α={}°)",
            self.span_pct,
            self.phase.label(),
            self.aoa_deg
        )
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Something drawn in a figure: the airfoil outline or one mesh's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trace {
    Airfoil,
    Mesh(MeshKind),
}

impl Trace {
    /// Every trace, in draw order.
    pub const ALL: [Trace; 4] = [
        Trace::Airfoil,
        Trace::Mesh(MeshKind::Unstructured),
        Trace::Mesh(MeshKind::Mosaic),
        Trace::Mesh(MeshKind::Structured),
    ];

    pub fn default_legend(self) -> &'static str {
        match self {
            Trace::Airfoil => "Airfoil",
            Trace::Mesh(MeshKind::Unstructured) => "Unstr.",
            Trace::Mesh(MeshKind::Mosaic) => "Mosaic",
            Trace::Mesh(MeshKind::Structured) => "Struct.",
        }
    }

    /// SVG colour name used when the configuration does not override it.
    pub fn default_color(self) -> &'static str {
        match self {
            Trace::Airfoil => "black",
            Trace::Mesh(MeshKind::Unstructured) => "royalblue",
            Trace::Mesh(MeshKind::Mosaic) => "forestgreen",
            Trace::Mesh(MeshKind::Structured) => "crimson",
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetGroup – every loaded case of a run
// ---------------------------------------------------------------------------

/// The series of every mesh for one case.
pub type MeshSeries = BTreeMap<MeshKind, Series>;

/// All cases of a run, keyed by [`DataKey`] in figure order.
#[derive(Debug, Clone, Default)]
pub struct DatasetGroup {
    pub cases: BTreeMap<DataKey, MeshSeries>,
}

impl DatasetGroup {
    pub fn insert(&mut self, key: DataKey, mesh: MeshKind, series: Series) {
        self.cases.entry(key).or_default().insert(mesh, series);
    }

    pub fn get(&self, key: &DataKey) -> Option<&MeshSeries> {
        self.cases.get(key)
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Total number of series across all cases.
    pub fn series_count(&self) -> usize {
        self.cases.values().map(|m| m.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_x_keeps_pairs_together() {
        let mut s = Series::from_points(vec![(0.5, -0.2), (0.1, 0.9), (0.3, -0.7)]);
        s.sort_by_x();
        assert_eq!(s.x, vec![0.1, 0.3, 0.5]);
        assert_eq!(s.y, vec![0.9, -0.7, -0.2]);
    }

    #[test]
    fn sort_by_x_is_stable_for_equal_x() {
        // Upper and lower surface share the trailing-edge x.
        let mut s = Series::from_points(vec![(1.0, 0.2), (0.0, 1.0), (1.0, 0.1)]);
        s.sort_by_x();
        assert_eq!(s.x, vec![0.0, 1.0, 1.0]);
        assert_eq!(s.y, vec![1.0, 0.2, 0.1]);
    }

    #[test]
    fn data_key_stem_and_title() {
        let key = DataKey::new(Phase::TwoPhase, 20, 75);
        assert_eq!(key.stem(), "cp_p2_a20_75");
        assert_eq!(key.to_string(), "cp_p2_a20_75");
        assert_eq!(key.title(), "Cp at 75% of the wing (Two-Phase, α=20°)");
    }

    #[test]
    fn dataset_group_counts_series() {
        let mut group = DatasetGroup::default();
        let key = DataKey::new(Phase::OnePhase, 0, 25);
        for mesh in MeshKind::ALL {
            group.insert(key, mesh, Series::from_points(vec![(0.0, 0.0)]));
        }
        assert_eq!(group.len(), 1);
        assert_eq!(group.series_count(), 3);
        assert!(group.get(&key).is_some_and(|m| m.contains_key(&MeshKind::Mosaic)));
    }
}
