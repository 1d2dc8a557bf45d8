//! SVG output
//!
//! Serializes a [`ChartScene`] into a standalone SVG document with a fixed
//! `viewBox`, meant to be scaled by the host layout. Markers carry a
//! `data-index` attribute so a host can map clicks back to
//! [`ChartEvent::PointClicked`](super::ChartEvent::PointClicked); the tooltip
//! group is tagged `data-role="tooltip"` and the root `data-role="chart"`.

use super::scene::{ChartBody, ChartScene, Label, TextAnchor};
use super::selection::ActivePoint;

/// Accessible name of every rendered chart
pub const ARIA_LABEL: &str = "Weight history chart";

const TOOLTIP_WIDTH: f64 = 80.0;
const TOOLTIP_HEIGHT: f64 = 35.0;

/// Render a scene, with the tooltip open at `active` if given
pub fn to_svg(scene: &ChartScene, active: Option<&ActivePoint>) -> String {
    let layout = &scene.layout;
    let palette = &scene.palette;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" class=\"w-full h-auto text-xs\" \
         role=\"img\" aria-label=\"{}\" data-role=\"chart\">\n",
        num(layout.width),
        num(layout.height),
        ARIA_LABEL
    ));
    svg.push_str(&format!("  <desc>{}</desc>\n", escape(&scene.description)));

    match &scene.body {
        ChartBody::Flat { y } => {
            svg.push_str(&format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"2\" />\n",
                num(layout.plot_left()),
                num(*y),
                num(layout.plot_right()),
                num(*y),
                palette.line
            ));
        }
        ChartBody::Plotted {
            axes,
            reference_lines,
        } => {
            // Vertical axis
            svg.push_str(&format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" />\n",
                num(layout.plot_left()),
                num(layout.plot_top()),
                num(layout.plot_left()),
                num(layout.plot_bottom()),
                palette.axis
            ));
            push_label(&mut svg, &axes.weight_max, palette.text);
            push_label(&mut svg, &axes.weight_min, palette.text);

            for line in reference_lines {
                svg.push_str(&format!(
                    "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" \
                     stroke-dasharray=\"4,4\" stroke-width=\"1\" data-reference=\"{}\" />\n",
                    num(layout.plot_left()),
                    num(line.y),
                    num(layout.plot_right()),
                    num(line.y),
                    palette.grid,
                    line.kind.as_str()
                ));
            }

            // Horizontal axis
            svg.push_str(&format!(
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" />\n",
                num(layout.plot_left()),
                num(layout.plot_bottom()),
                num(layout.plot_right()),
                num(layout.plot_bottom()),
                palette.axis
            ));
            push_label(&mut svg, &axes.date_left, palette.text);
            push_label(&mut svg, &axes.date_right, palette.text);

            let points: Vec<String> = scene
                .polyline_points()
                .iter()
                .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                .collect();
            svg.push_str(&format!(
                "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" />\n",
                points.join(" "),
                palette.line
            ));
        }
    }

    for (index, point) in scene.points.iter().enumerate() {
        if scene.is_interactive() {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" class=\"cursor-pointer\" data-index=\"{}\" />\n",
                num(point.x),
                num(point.y),
                num(scene.marker_radius),
                palette.line,
                index
            ));
        } else {
            svg.push_str(&format!(
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" class=\"cursor-pointer\" data-index=\"{}\">\
                 <title>{}: {}</title></circle>\n",
                num(point.x),
                num(point.y),
                num(scene.marker_radius),
                palette.line,
                index,
                escape(&point.source.date_label()),
                escape(&point.source.value_label())
            ));
        }
    }

    if let Some(active) = active.filter(|_| scene.is_interactive()) {
        push_tooltip(&mut svg, active, palette.line);
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_label(svg: &mut String, label: &Label, color: &str) {
    let font_size = label
        .font_size
        .map(|size| format!(" font-size=\"{}\"", num(size)))
        .unwrap_or_default();
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" dominant-baseline=\"middle\" text-anchor=\"{}\" fill=\"{}\"{}>{}</text>\n",
        num(label.x),
        num(label.y),
        label.anchor.as_str(),
        color,
        font_size,
        escape(&label.text)
    ));
}

fn push_tooltip(svg: &mut String, active: &ActivePoint, line_color: &str) {
    let (x, y) = (active.x, active.y);

    svg.push_str("  <g data-role=\"tooltip\">\n");
    svg.push_str(&format!(
        "    <circle cx=\"{}\" cy=\"{}\" r=\"6\" fill=\"white\" stroke=\"{}\" stroke-width=\"2\" />\n",
        num(x),
        num(y),
        line_color
    ));
    svg.push_str(&format!(
        "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"4\" fill=\"rgba(0,0,0,0.8)\" />\n",
        num(x - TOOLTIP_WIDTH / 2.0),
        num(y - 45.0),
        num(TOOLTIP_WIDTH),
        num(TOOLTIP_HEIGHT)
    ));
    svg.push_str(&format!(
        "    <text x=\"{}\" y=\"{}\" text-anchor=\"{}\" fill=\"white\" font-size=\"11\" font-weight=\"bold\">{}</text>\n",
        num(x),
        num(y - 30.0),
        TextAnchor::Middle.as_str(),
        escape(&active.value)
    ));
    svg.push_str(&format!(
        "    <text x=\"{}\" y=\"{}\" text-anchor=\"{}\" fill=\"#ccc\" font-size=\"9\">{}</text>\n",
        num(x),
        num(y - 18.0),
        TextAnchor::Middle.as_str(),
        escape(&active.date)
    ));
    svg.push_str("  </g>\n");
}

/// Coordinates rounded to 2 decimals, trailing zeros dropped
fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{build_scene, ChartOptions, ChartVariant, Selection, Theme};
    use crate::weight::{SortOrder, WeightEntry, WeightUnit};

    fn entries() -> Vec<WeightEntry> {
        vec![
            WeightEntry::on_day(2024, 1, 1, 10.0, WeightUnit::Kg).unwrap(),
            WeightEntry::on_day(2024, 2, 1, 12.0, WeightUnit::Kg).unwrap(),
        ]
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(50.0), "50");
        assert_eq!(num(183.333333), "183.33");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\">"), "a&lt;b &amp; &quot;c&quot;&gt;");
        assert_eq!(escape("Rex's"), "Rex&apos;s");
    }

    #[test]
    fn test_detailed_svg_contents() {
        let scene =
            build_scene(&entries(), SortOrder::Asc, Theme::Light, &ChartOptions::default()).unwrap();
        let svg = to_svg(&scene, None);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 500 250\""));
        assert!(svg.contains("aria-label=\"Weight history chart\""));
        assert!(svg.contains(">17.0 kg</text>"));
        assert!(svg.contains(">5.0 kg</text>"));
        assert!(svg.contains(">01/01/2024</text>"));
        assert!(svg.contains(">01/02/2024</text>"));
        assert!(svg.contains("stroke-dasharray=\"4,4\""));
        assert!(svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(!svg.contains("data-role=\"tooltip\""));
        assert!(svg.contains("stroke=\"#000000\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_tooltip_rendered_when_selected() {
        let scene =
            build_scene(&entries(), SortOrder::Asc, Theme::Dark, &ChartOptions::default()).unwrap();
        let selection = Selection::at(&scene, 1);
        let svg = to_svg(&scene, selection.active());

        assert!(svg.contains("data-role=\"tooltip\""));
        assert!(svg.contains(">12.0 kg</text>"));
        assert!(svg.contains("fill=\"rgba(0,0,0,0.8)\""));
        assert!(svg.contains("stroke=\"#3b82f6\""));
    }

    #[test]
    fn test_basic_svg_uses_titles_and_theme() {
        let options = ChartOptions {
            variant: ChartVariant::Basic,
            ..ChartOptions::default()
        };
        let scene = build_scene(&entries(), SortOrder::Asc, Theme::Dark, &options).unwrap();
        let svg = to_svg(&scene, None);

        assert!(svg.contains("<title>01/02/2024: 12.0 kg</title>"));
        assert!(svg.contains("stroke=\"#a3a3a3\""));
        assert!(!svg.contains("stroke-dasharray"));
        assert!(!svg.contains("#000000"));
    }

    #[test]
    fn test_flat_line_svg() {
        let entries = vec![
            WeightEntry::on_day(2024, 1, 1, 9.0, WeightUnit::Kg).unwrap(),
            WeightEntry::on_day(2024, 2, 1, 9.0, WeightUnit::Kg).unwrap(),
        ];
        let options = ChartOptions {
            variant: ChartVariant::Basic,
            ..ChartOptions::default()
        };
        let scene = build_scene(&entries, SortOrder::Asc, Theme::Light, &options).unwrap();
        let svg = to_svg(&scene, None);

        assert!(svg.contains("<line x1=\"50\" y1=\"115\" x2=\"480\" y2=\"115\""));
        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("<text"));
    }
}
