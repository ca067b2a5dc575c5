//! Chart Component
//!
//! Single-series line chart on an HTML5 canvas. Periods are categorical, so
//! points are spaced evenly by index; missing values break the line.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::{Observation, SeriesData};

const CANVAS_WIDTH: u32 = 1000;
const CANVAS_HEIGHT: u32 = 400;
const LINE_COLOR: &str = "#0d6efd";
const GRID_COLOR: &str = "#e9ecef";
const LABEL_COLOR: &str = "#6c757d";
const MAX_X_LABELS: usize = 8;

/// Drawing area inside the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_left: 70.0,
            margin_right: 20.0,
            margin_top: 30.0,
            margin_bottom: 40.0,
        }
    }

    fn chart_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    fn chart_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// X position of point `index` out of `count`
    pub fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.margin_left + self.chart_width() / 2.0;
        }
        self.margin_left + (index as f64 / (count - 1) as f64) * self.chart_width()
    }

    /// Y position of `value` (canvas y grows downward)
    pub fn y(&self, value: f64, bounds: (f64, f64)) -> f64 {
        let (min, max) = bounds;
        self.margin_top + ((max - value) / (max - min)) * self.chart_height()
    }
}

/// Y-axis bounds with 10% padding, or `None` when no value is present
pub fn value_bounds(observations: &[Observation]) -> Option<(f64, f64)> {
    let (min, max) = observations
        .iter()
        .filter_map(|o| o.value)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
    Some((min - padding, max + padding))
}

/// Canvas coordinates of the series, split into runs of present values.
pub fn line_segments(
    observations: &[Observation],
    area: &PlotArea,
    bounds: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let count = observations.len();
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (i, obs) in observations.iter().enumerate() {
        match obs.value {
            Some(v) => current.push((area.x(i, count), area.y(v, bounds))),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Indices that get an x-axis label: first, last and evenly spaced between.
pub fn label_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    if count <= max_labels {
        return (0..count).collect();
    }
    if max_labels == 1 {
        return vec![0];
    }

    let step = (count - 1) as f64 / (max_labels - 1) as f64;
    let mut indices: Vec<usize> = (0..max_labels)
        .map(|i| (i as f64 * step).round() as usize)
        .collect();
    indices.dedup();
    indices
}

/// Line chart for one series
#[component]
pub fn Chart(series: SeriesData) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Draw once the canvas is mounted
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &series);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width=CANVAS_WIDTH
            height=CANVAS_HEIGHT
        />
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, series: &SeriesData) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let area = PlotArea::new(canvas.width() as f64, canvas.height() as f64);
    let observations = &series.observations;

    // Clear canvas
    ctx.set_fill_style(&"#ffffff".into());
    ctx.fill_rect(0.0, 0.0, area.width, area.height);

    // Title
    ctx.set_fill_style(&"#212529".into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text(&format!("Indicator {}", series.series_id), area.margin_left, 20.0);

    let bounds = match value_bounds(observations) {
        Some(bounds) => bounds,
        None => {
            ctx.set_fill_style(&LABEL_COLOR.into());
            let _ = ctx.fill_text("No values to plot", area.width / 2.0 - 60.0, area.height / 2.0);
            return;
        }
    };

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&GRID_COLOR.into());
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let value = bounds.1 - (i as f64 / 5.0) * (bounds.1 - bounds.0);
        let y = area.y(value, bounds);

        ctx.begin_path();
        ctx.move_to(area.margin_left, y);
        ctx.line_to(area.width - area.margin_right, y);
        ctx.stroke();

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format_value(value), 5.0, y + 4.0);
    }

    // Line
    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    for segment in line_segments(observations, &area, bounds) {
        ctx.begin_path();
        for (i, (x, y)) in segment.iter().enumerate() {
            if i == 0 {
                ctx.move_to(*x, *y);
            } else {
                ctx.line_to(*x, *y);
            }
        }
        ctx.stroke();

        // Markers
        ctx.set_fill_style(&LINE_COLOR.into());
        for (x, y) in &segment {
            ctx.begin_path();
            let _ = ctx.arc(*x, *y, 3.0, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }
    }

    // X-axis labels
    ctx.set_fill_style(&LABEL_COLOR.into());
    ctx.set_font("12px sans-serif");
    for index in label_indices(observations.len(), MAX_X_LABELS) {
        let x = area.x(index, observations.len());
        let _ = ctx.fill_text(&observations[index].date, x - 24.0, area.height - 12.0);
    }
}

fn format_value(value: f64) -> String {
    if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}
