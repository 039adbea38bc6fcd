//! Property tests for loading and normalisation.

use std::path::Path;

use cp_plots::data::loader::{airfoil_y_scale, parse_fluent_xy, X_SCALE};
use cp_plots::data::model::Series;
use cp_plots::data::normalize::unitless;
use proptest::prelude::*;

fn fluent_text(points: &[(f64, f64)]) -> String {
    let mut text = String::from(
        "(title \"Pressure Coefficient\")\n(labels \"Position\" \"Pressure Coefficient\")\n\n((xy/key/label \"wing\")\n",
    );
    for (x, y) in points {
        text.push_str(&format!("{x}\t{y}\n"));
    }
    text.push_str(")\n");
    text
}

proptest! {
    /// After normalisation the first x is 0 and the last is 1.
    #[test]
    fn test_unitless_endpoints(
        start in -10.0f64..10.0,
        steps in prop::collection::vec(1e-3f64..1.0, 1..200),
    ) {
        let mut x = start;
        let points: Vec<(f64, f64)> = steps
            .iter()
            .map(|dx| {
                x += dx;
                (x, 0.0)
            })
            .collect();
        let mut series = Series::from_points(std::iter::once((start, 0.0)).chain(points));

        unitless(&mut series).unwrap();

        prop_assert_eq!(series.x[0], 0.0);
        prop_assert_eq!(*series.x.last().unwrap(), 1.0);
        prop_assert!(series.x.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    /// Loaded rows are non-decreasing in x and keep their (x, y) pairing.
    #[test]
    fn test_loader_sorts_by_x(
        points in prop::collection::vec((-5.0f64..5.0, -2.0f64..2.0), 0..150),
    ) {
        let series = parse_fluent_xy(&fluent_text(&points), Path::new("prop.xy")).unwrap();

        prop_assert_eq!(series.len(), points.len());
        prop_assert!(series.x.windows(2).all(|w| w[0] <= w[1]));
        for (x, y) in series.points() {
            prop_assert!(points.contains(&(x, y)));
        }
    }

    /// Airfoil Y scale depends on the axis bounds only, not on their order.
    #[test]
    fn test_airfoil_scale(lower in -5.0f64..0.0, upper in 0.0f64..5.0) {
        let scale = airfoil_y_scale([lower, upper]);
        prop_assert!((scale - (lower - upper) * X_SCALE * 1.1).abs() < 1e-12);
        prop_assert!(scale <= 0.0);
        prop_assert_eq!(airfoil_y_scale([upper, lower]), scale);
    }
}
