use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use palette::Srgb;
use plotters::style::RGBColor;

use crate::config::StylesConfig;
use crate::data::model::Trace;

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// Resolve an SVG/CSS colour name (`royalblue`, `Crimson`, ...).
pub fn named_color(name: &str) -> Option<RGBColor> {
    let lower = name.trim().to_ascii_lowercase();
    palette::named::from_str(&lower).map(|c: Srgb<u8>| RGBColor(c.red, c.green, c.blue))
}

// ---------------------------------------------------------------------------
// Style mapping: trace → colour + legend label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TraceStyle {
    pub legend: String,
    pub color: RGBColor,
}

/// Display metadata of every trace drawn in a figure.
#[derive(Debug, Clone)]
pub struct StyleMap {
    mapping: BTreeMap<Trace, TraceStyle>,
    default_style: TraceStyle,
}

const FALLBACK_COLOR: RGBColor = RGBColor(128, 128, 128);

impl StyleMap {
    /// Build the style map, applying configured overrides over the built-in
    /// legends and colours.
    pub fn from_config(styles: &StylesConfig) -> Result<Self> {
        let mut mapping = BTreeMap::new();
        for trace in Trace::ALL {
            let over = styles.get(trace);
            let color_name = over.color.as_deref().unwrap_or(trace.default_color());
            let color = named_color(color_name)
                .ok_or_else(|| anyhow!("unknown colour '{color_name}' for {trace:?}"))?;
            let legend = over
                .legend
                .clone()
                .unwrap_or_else(|| trace.default_legend().to_string());
            mapping.insert(trace, TraceStyle { legend, color });
        }

        Ok(StyleMap {
            mapping,
            default_style: TraceStyle {
                legend: String::new(),
                color: FALLBACK_COLOR,
            },
        })
    }

    /// Look up the style of a trace.
    pub fn style_for(&self, trace: Trace) -> &TraceStyle {
        self.mapping.get(&trace).unwrap_or(&self.default_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleConfig;
    use crate::data::model::MeshKind;

    #[test]
    fn resolves_study_colours() {
        assert_eq!(named_color("royalblue"), Some(RGBColor(65, 105, 225)));
        assert_eq!(named_color("forestgreen"), Some(RGBColor(34, 139, 34)));
        assert_eq!(named_color("Crimson"), Some(RGBColor(220, 20, 60)));
        assert_eq!(named_color("black"), Some(RGBColor(0, 0, 0)));
        assert_eq!(named_color("no-such-colour"), None);
    }

    #[test]
    fn defaults_match_study_legends() {
        let map = StyleMap::from_config(&StylesConfig::default()).unwrap();
        let labels: Vec<&str> = Trace::ALL
            .into_iter()
            .map(|t| map.style_for(t).legend.as_str())
            .collect();
        assert_eq!(labels, vec!["Airfoil", "Unstr.", "Mosaic", "Struct."]);
        assert_eq!(
            map.style_for(Trace::Mesh(MeshKind::Structured)).color,
            RGBColor(220, 20, 60)
        );
        assert_eq!(map.style_for(Trace::Airfoil).color, RGBColor(0, 0, 0));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let styles = StylesConfig {
            unstructured: StyleConfig {
                legend: Some("Tetra".into()),
                color: None,
            },
            ..StylesConfig::default()
        };
        let map = StyleMap::from_config(&styles).unwrap();
        let style = map.style_for(Trace::Mesh(MeshKind::Unstructured));
        assert_eq!(style.legend, "Tetra");
        assert_eq!(style.color, RGBColor(65, 105, 225));
    }

    #[test]
    fn unknown_colour_is_an_error() {
        let styles = StylesConfig {
            airfoil: StyleConfig {
                legend: None,
                color: Some("ultraviolet".into()),
            },
            ..StylesConfig::default()
        };
        let err = StyleMap::from_config(&styles).unwrap_err();
        assert!(err.to_string().contains("ultraviolet"));
    }
}
