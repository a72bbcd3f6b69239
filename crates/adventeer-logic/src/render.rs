//! SVG output for a generated trail.
//!
//! [`path_data`] is the `d` attribute the map screen draws as a dashed
//! polyline. [`render_svg`] wraps a whole [`TrailMap`] in a standalone
//! document for eyeballing trails from the harness.

use crate::config::TrailConfig;
use crate::map::{TrailMap, WaypointStatus};
use crate::trail::TrailPoint;

const TRAIL_COLOR: &str = "#e11d48";
const OUTLINE_COLOR: &str = "#742a2a";
const LOCKED_COLOR: &str = "#94a3b8";

/// SVG path data: `M x0,y0 L x1,y1 L ...`. Empty input gives an empty string.
pub fn path_data(points: &[TrailPoint]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let vertices: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    format!("M {}", vertices.join(" L "))
}

fn waypoint_style(status: WaypointStatus) -> (f64, &'static str) {
    match status {
        WaypointStatus::Current => (12.0, "#16A34A"),
        WaypointStatus::Completed => (8.0, "#FBBF24"),
        WaypointStatus::Locked => (8.0, LOCKED_COLOR),
    }
}

/// Standalone SVG document for a trail map.
pub fn render_svg(map: &TrailMap, config: &TrailConfig) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n",
        map.width, config.viewport_height, map.width, config.viewport_height
    ));
    svg.push_str(&format!(
        "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"4\" stroke-dasharray=\"8,4\"/>\n",
        path_data(&map.points),
        TRAIL_COLOR
    ));

    for waypoint in &map.waypoints {
        let (radius, fill) = waypoint_style(waypoint.status);
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            waypoint.point.x, waypoint.point.y, radius, fill, OUTLINE_COLOR
        ));
    }

    for milestone in &map.milestones {
        let fill = if milestone.unlocked { "#f97316" } else { LOCKED_COLOR };
        let (x, y) = (milestone.point.x, milestone.point.y);
        svg.push_str(&format!(
            "  <g class=\"milestone\">\n    <circle cx=\"{}\" cy=\"{}\" r=\"18\" fill=\"{}\" stroke=\"{}\" stroke-width=\"3\"/>\n",
            x, y, fill, OUTLINE_COLOR
        ));
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"#fff\" font-size=\"12\">{}</text>\n",
            x, y, milestone.level
        ));
        if milestone.unlocked {
            // Check mark.
            svg.push_str(&format!(
                "    <path d=\"M {},{} L {},{} L {},{}\" stroke=\"#fff\" stroke-width=\"2\" fill=\"none\"/>\n",
                x - 5.0,
                y,
                x + 1.0,
                y + 5.0,
                x + 7.0,
                y - 5.0
            ));
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_data_formats_vertices() {
        let points = [
            TrailPoint::new(100.0, 250.0),
            TrailPoint::new(110.5, 260.0),
            TrailPoint::new(1100.0, 240.25),
        ];
        assert_eq!(
            path_data(&points),
            "M 100,250 L 110.5,260 L 1100,240.25"
        );
    }

    #[test]
    fn path_data_empty() {
        assert_eq!(path_data(&[]), "");
    }

    #[test]
    fn svg_contains_every_marker() {
        let config = TrailConfig::default();
        let map = TrailMap::build("abc", 6, &config);
        let svg = render_svg(&map, &config);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("d=\"M 100,250 L "));
        assert_eq!(
            svg.matches("class=\"milestone\"").count(),
            map.milestones.len()
        );
        assert_eq!(
            svg.matches("<circle").count(),
            map.waypoints.len() + map.milestones.len()
        );
    }
}
