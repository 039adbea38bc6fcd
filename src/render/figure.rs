use std::path::Path;

use anyhow::{Context, Result};
use std::ops::Range;

use plotters::coord::combinators::{BindKeyPoints, WithKeyPoints};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use super::backend::TextSafeBackend;
use crate::color::StyleMap;
use crate::config::FigureConfig;
use crate::data::model::{AirfoilGeometry, DataKey, MeshKind, MeshSeries, Trace};

const FONT_FAMILY: &str = "sans-serif";

const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const DASH_PX: f64 = 4.0;
const GAP_PX: f64 = 2.5;
const TICK_PX: f64 = 6.0;
/// Rough number of intervals per axis.
const TICK_TARGET: usize = 6;

/// Pass-through over `WithKeyPoints<RangedCoordf64>` whose only difference is
/// `FormatOption = DefaultFormatting`, so plotters accepts it in
/// `configure_mesh` (labels are formatted by the explicit label formatters).
struct KeyPointAxis(WithKeyPoints<RangedCoordf64>);

impl Ranged for KeyPointAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn range(&self) -> Range<f64> {
        self.0.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// A 1, 2 or 5 × 10^k step splitting `span` into about `target` intervals.
fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let nice = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

/// Multiples of `step` inside `[lo, hi]`.
fn tick_values(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// `(on, off)` dash pattern along `[start, end]` as `(from, to)` pieces.
fn dash_intervals(start: f64, end: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut pieces = Vec::new();
    if dash <= 0.0 || gap < 0.0 {
        return pieces;
    }
    let mut from = start;
    while from < end {
        pieces.push((from, (from + dash).min(end)));
        from += dash + gap;
    }
    pieces
}

// ---------------------------------------------------------------------------
// Cp comparison figure
// ---------------------------------------------------------------------------

/// Draws one comparison figure per case: the airfoil outline behind the Cp
/// scatter of every mesh, on an inverted Cp axis.
pub struct FigureRenderer<'a> {
    figure: &'a FigureConfig,
    styles: &'a StyleMap,
    /// Cp axis limits, lower bound first.
    cp_limits: (f64, f64),
}

impl<'a> FigureRenderer<'a> {
    pub fn new(figure: &'a FigureConfig, styles: &'a StyleMap, y_axis: [f64; 2]) -> Self {
        let [a, b] = y_axis;
        Self {
            figure,
            styles,
            cp_limits: (a.min(b), a.max(b)),
        }
    }

    /// Render the figure for `key` and write it as a PNG to `path`.
    pub fn render_png(
        &self,
        path: &Path,
        key: &DataKey,
        airfoil: &AirfoilGeometry,
        series: &MeshSeries,
    ) -> Result<()> {
        let size = (self.figure.width, self.figure.height);
        let root = TextSafeBackend::new(BitMapBackend::new(path, size)).into_drawing_area();
        self.draw(root, key, airfoil, series)
            .with_context(|| format!("rendering {}", path.display()))
    }

    /// Draw onto any plotters backend.
    ///
    /// Cp is plotted negated so that suction (negative Cp) sits at the top;
    /// tick labels undo the negation.
    pub fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        key: &DataKey,
        airfoil: &AirfoilGeometry,
        series: &MeshSeries,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let (cp_lo, cp_hi) = self.cp_limits;
        let font_size = self.figure.font_size;
        let tick_size = (font_size * 3 / 4).max(1);

        let x_ticks = tick_values(0.0, 1.0, nice_step(1.0, TICK_TARGET));
        let y_ticks: Vec<f64> = tick_values(cp_lo, cp_hi, nice_step(cp_hi - cp_lo, TICK_TARGET))
            .into_iter()
            .map(|cp| -cp)
            .collect();
        let (x_min, x_max) = (0.0, 1.0);
        let (y_min, y_max) = (-cp_hi, -cp_lo);

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(key.title(), (FONT_FAMILY, font_size))
            .margin(12)
            .x_label_area_size(font_size * 3)
            .y_label_area_size(font_size * 4)
            .build_cartesian_2d(
                KeyPointAxis((x_min..x_max).with_key_points(x_ticks.clone())),
                KeyPointAxis((y_min..y_max).with_key_points(y_ticks.clone())),
            )?;

        // Mesh lines and outer tick marks off; the dashed grid, frame and
        // inward ticks are drawn below.
        chart
            .configure_mesh()
            .disable_mesh()
            .set_all_tick_mark_size(0)
            .x_desc("x/c (-)")
            .y_desc("Cp (-)")
            .x_labels(x_ticks.len())
            .y_labels(y_ticks.len())
            .x_label_formatter(&|v: &f64| format!("{v:.1}"))
            .y_label_formatter(&|v: &f64| format!("{:.1}", -*v + 0.0))
            .label_style((FONT_FAMILY, tick_size))
            .axis_desc_style((FONT_FAMILY, font_size))
            .draw()?;

        let (w_px, h_px) = chart.plotting_area().dim_in_pixel();
        let px_x = (x_max - x_min) / f64::from(w_px.max(1));
        let px_y = (y_max - y_min) / f64::from(h_px.max(1));

        let grid = GRID_COLOR.mix(0.8).stroke_width(1);
        let mut grid_lines = Vec::new();
        for &x in &x_ticks {
            for (a, b) in dash_intervals(y_min, y_max, DASH_PX * px_y, GAP_PX * px_y) {
                grid_lines.push(PathElement::new(vec![(x, a), (x, b)], grid));
            }
        }
        for &y in &y_ticks {
            for (a, b) in dash_intervals(x_min, x_max, DASH_PX * px_x, GAP_PX * px_x) {
                grid_lines.push(PathElement::new(vec![(a, y), (b, y)], grid));
            }
        }
        chart.draw_series(grid_lines)?;

        // Airfoil outline first so the scatter sits on top.
        let outline = self.styles.style_for(Trace::Airfoil);
        let outline_color = outline.color;
        let line_width = self.figure.line_width;
        chart
            .draw_series(LineSeries::new(
                airfoil.points().map(|(x, y)| (x, -y)),
                outline_color.stroke_width(line_width),
            ))?
            .label(outline.legend.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], outline_color.stroke_width(line_width))
            });

        let marker = self.figure.marker_size;
        for mesh in MeshKind::ALL {
            let Some(points) = series.get(&mesh) else {
                continue;
            };
            let style = self.styles.style_for(Trace::Mesh(mesh));
            let color = style.color;
            chart
                .draw_series(
                    points
                        .points()
                        .filter(|&(_, cp)| cp >= cp_lo && cp <= cp_hi)
                        .map(|(x, cp)| Circle::new((x, -cp), marker, color.filled())),
                )?
                .label(style.legend.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), marker, color.filled()));
        }

        let frame = BLACK.stroke_width(1);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x_min, y_min), (x_max, y_max)],
            frame,
        )))?;
        let (tick_x, tick_y) = (TICK_PX * px_x, TICK_PX * px_y);
        let mut ticks = Vec::with_capacity(2 * (x_ticks.len() + y_ticks.len()));
        for &x in &x_ticks {
            ticks.push(PathElement::new(vec![(x, y_min), (x, y_min + tick_y)], frame));
            ticks.push(PathElement::new(vec![(x, y_max), (x, y_max - tick_y)], frame));
        }
        for &y in &y_ticks {
            ticks.push(PathElement::new(vec![(x_min, y), (x_min + tick_x, y)], frame));
            ticks.push(PathElement::new(vec![(x_max, y), (x_max - tick_x, y)], frame));
        }
        chart.draw_series(ticks)?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, tick_size))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .draw()?;

        root.present()?;
        Ok(())
    }
}
