//! Small SVG charts for the dashboard: bars, a line and a pie.

use std::f64::consts::TAU;

use seed::{prelude::*, *};
use shared::analytics::{CostSlice, MaintenancePoint, SeriesPoint};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 240.0;
const PADDING: f64 = 28.0;
const BAR_GAP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest value, or 1.0 so an all-zero series still has a scale.
fn scale_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

/// Bars filling a `width` x `height` plot, tallest one touching the top.
pub fn bar_rects(values: &[f64], width: f64, height: f64) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let max = scale_max(values);
    let slot = width / values.len() as f64;
    let bar_width = (slot - BAR_GAP).max(1.0);
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let bar_height = value.max(0.0) / max * height;
            Rect {
                x: idx as f64 * slot + (slot - bar_width) / 2.0,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

/// `points` attribute of a polyline spread evenly across the plot.
pub fn polyline_points(values: &[f64], width: f64, height: f64) -> String {
    let max = scale_max(values);
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let x = idx as f64 * step;
            let y = height - value.max(0.0) / max * height;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One SVG path per value; slices start at twelve o'clock and run clockwise.
pub fn pie_paths(values: &[f64], cx: f64, cy: f64, radius: f64) -> Vec<String> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let point = |angle: f64| {
        (
            cx + radius * (angle - TAU / 4.0).cos(),
            cy + radius * (angle - TAU / 4.0).sin(),
        )
    };

    let mut start = 0.0;
    values
        .iter()
        .map(|value| {
            let fraction = value.max(0.0) / total;
            if fraction >= 1.0 - f64::EPSILON {
                // A full circle cannot be drawn as a single arc.
                return format!(
                    "M {:.2} {:.2} A {radius:.2} {radius:.2} 0 1 1 {:.2} {:.2} A {radius:.2} {radius:.2} 0 1 1 {:.2} {:.2} Z",
                    cx,
                    cy - radius,
                    cx,
                    cy + radius,
                    cx,
                    cy - radius
                );
            }
            let end = start + fraction * TAU;
            let (x0, y0) = point(start);
            let (x1, y1) = point(end);
            let large_arc = u8::from(fraction > 0.5);
            start = end;
            format!(
                "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
            )
        })
        .collect()
}

fn plot_frame<Ms: 'static>(content: Vec<Node<Ms>>) -> Node<Ms> {
    svg![
        C!["chart-svg"],
        attrs! {
            At::ViewBox => format!(
                "0 0 {} {}",
                WIDTH + 2.0 * PADDING,
                HEIGHT + 2.0 * PADDING
            ),
        },
        g![
            attrs! { At::Transform => format!("translate({PADDING} {PADDING})") },
            content
        ],
    ]
}

pub fn bar_chart<Ms: 'static>(series: &[SeriesPoint], fill: &str) -> Node<Ms> {
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    let bars = bar_rects(&values, WIDTH, HEIGHT)
        .into_iter()
        .zip(series)
        .map(|(rect, point)| {
            g![
                rect![
                    attrs! {
                        At::X => format!("{:.1}", rect.x),
                        At::Y => format!("{:.1}", rect.y),
                        At::Width => format!("{:.1}", rect.width),
                        At::Height => format!("{:.1}", rect.height),
                        At::Fill => fill,
                    },
                    title![format!("{}: {:.2} kWh", point.label, point.value)],
                ],
                text![
                    attrs! {
                        At::X => format!("{:.1}", rect.x + rect.width / 2.0),
                        At::Y => format!("{:.1}", HEIGHT + 16.0),
                        At::TextAnchor => "middle",
                        At::FontSize => "10",
                    },
                    point.label.as_str(),
                ],
            ]
        })
        .collect();
    plot_frame(bars)
}

pub fn maintenance_line_chart<Ms: 'static>(series: &[MaintenancePoint], stroke: &str) -> Node<Ms> {
    let values: Vec<f64> = series.iter().map(|p| p.cost).collect();
    let line = polyline![attrs! {
        At::Points => polyline_points(&values, WIDTH, HEIGHT),
        At::Fill => "none",
        At::Stroke => stroke,
        At::StrokeWidth => "2",
    }];

    let max = scale_max(&values);
    let step = if values.len() > 1 {
        WIDTH / (values.len() - 1) as f64
    } else {
        0.0
    };
    let markers: Vec<Node<Ms>> = series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            circle![
                attrs! {
                    At::Cx => format!("{:.1}", idx as f64 * step),
                    At::Cy => format!("{:.1}", HEIGHT - point.cost.max(0.0) / max * HEIGHT),
                    At::R => "4",
                    At::Fill => stroke,
                },
                title![format!("{}: {}", point.date, point.tooltip())],
            ]
        })
        .collect();

    let mut content = vec![line];
    content.extend(markers);
    plot_frame(content)
}

pub fn pie_chart<Ms: 'static>(slices: &[CostSlice]) -> Node<Ms> {
    let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let radius = 80.0;
    let paths = pie_paths(&values, radius, radius, radius)
        .into_iter()
        .zip(slices)
        .map(|(d, slice)| {
            path![
                attrs! { At::D => d, At::Fill => slice.color },
                title![format!("{}: ₹{:.0}", slice.name, slice.value)],
            ]
        });

    div![
        C!["pie-chart"],
        svg![
            attrs! { At::ViewBox => format!("0 0 {} {}", radius * 2.0, radius * 2.0) },
            paths
        ],
        ul![
            C!["legend"],
            slices.iter().map(|slice| {
                li![
                    span![
                        C!["swatch"],
                        style! { St::BackgroundColor => slice.color },
                    ],
                    format!("{}: ₹{:.0}", slice.name, slice.value),
                ]
            })
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_rects_scale_to_tallest_value() {
        let rects = bar_rects(&[2.0, 4.0], 100.0, 50.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].height, 50.0);
        assert_eq!(rects[1].y, 0.0);
        assert_eq!(rects[0].height, 25.0);
        assert_eq!(rects[0].width, 44.0);
        assert_eq!(rects[0].x, 3.0);
    }

    #[test]
    fn test_bar_rects_handle_empty_and_zero_series() {
        assert!(bar_rects(&[], 100.0, 50.0).is_empty());
        let flat = bar_rects(&[0.0, 0.0], 100.0, 50.0);
        assert!(flat.iter().all(|r| r.height == 0.0 && r.y == 50.0));
    }

    #[test]
    fn test_polyline_points_span_plot() {
        assert_eq!(
            polyline_points(&[0.0, 5.0, 10.0], 100.0, 50.0),
            "0.0,50.0 50.0,25.0 100.0,0.0"
        );
        assert_eq!(polyline_points(&[3.0], 100.0, 50.0), "0.0,0.0");
    }

    #[test]
    fn test_pie_paths_split_circle() {
        let paths = pie_paths(&[1.0, 1.0], 10.0, 10.0, 10.0);
        assert_eq!(paths.len(), 2);
        assert_eq!(
            paths[0],
            "M 10.00 10.00 L 10.00 0.00 A 10.00 10.00 0 0 1 10.00 20.00 Z"
        );
        assert!(paths[1].ends_with("10.00 0.00 Z"));
    }

    #[test]
    fn test_pie_paths_single_slice_draws_full_circle() {
        let paths = pie_paths(&[0.0, 5.0], 10.0, 10.0, 10.0);
        assert_eq!(paths.len(), 2);
        assert!(paths[1].contains("A 10.00 10.00 0 1 1 10.00 20.00"));
        assert!(pie_paths(&[0.0, 0.0], 10.0, 10.0, 10.0).is_empty());
    }
}
