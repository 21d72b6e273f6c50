//! Chart Component
//!
//! Daily reels/minutes charts using HTML5 Canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use reeltrack::model::DailySummary;
use reeltrack::stats::day_axis_label;

/// Which daily series a chart shows
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DailySeries {
    /// Reels per day, drawn as bars
    Reels,
    /// Minutes per day, drawn as a line
    Minutes,
}

impl DailySeries {
    fn value(self, day: &DailySummary) -> f64 {
        match self {
            DailySeries::Reels => day.total_reels as f64,
            DailySeries::Minutes => day.total_minutes as f64,
        }
    }

    fn color(self) -> &'static str {
        match self {
            DailySeries::Reels => "#FF9800", // Orange (primary)
            DailySeries::Minutes => "#2196F3", // Blue
        }
    }
}

/// Daily chart component
#[component]
pub fn DailyChart(
    #[prop(into)]
    title: String,
    series: DailySeries,
    #[prop(into)]
    daily: Signal<Vec<DailySummary>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw when the daily data changes
    create_effect(move |_| {
        let days = daily.get();

        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &days, series);
        }
    });

    view! {
        <div class="bg-gray-800 rounded-lg p-6 border border-gray-700">
            <h2 class="text-lg font-semibold mb-4">{title}</h2>
            <canvas
                node_ref=canvas_ref
                width="800"
                height="300"
                class="w-full h-64 rounded-lg"
            />
        </div>
    }
}

/// Top of the y axis: the largest value with a little headroom, never zero
fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, days: &[DailySummary], series: DailySeries) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if days.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No sessions tracked yet", width / 2.0 - 80.0, height / 2.0);
        return;
    }

    let values: Vec<f64> = days.iter().map(|d| series.value(d)).collect();
    let y_max = axis_max(&values);

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");

    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 4.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let slot = chart_width / values.len() as f64;
    let x_center = |i: usize| margin_left + slot * (i as f64 + 0.5);
    let y_for = |v: f64| margin_top + (1.0 - v / y_max) * chart_height;

    ctx.set_fill_style(&series.color().into());
    ctx.set_stroke_style(&series.color().into());

    match series {
        DailySeries::Reels => {
            let bar_width = (slot * 0.6).max(1.0);
            for (i, v) in values.iter().enumerate() {
                let top = y_for(*v);
                ctx.fill_rect(
                    x_center(i) - bar_width / 2.0,
                    top,
                    bar_width,
                    margin_top + chart_height - top,
                );
            }
        }
        DailySeries::Minutes => {
            ctx.set_line_width(2.0);
            ctx.begin_path();
            for (i, v) in values.iter().enumerate() {
                if i == 0 {
                    ctx.move_to(x_center(i), y_for(*v));
                } else {
                    ctx.line_to(x_center(i), y_for(*v));
                }
            }
            ctx.stroke();

            for (i, v) in values.iter().enumerate() {
                ctx.begin_path();
                let _ = ctx.arc(x_center(i), y_for(*v), 3.0, 0.0, std::f64::consts::PI * 2.0);
                ctx.fill();
            }
        }
    }

    // X-axis labels, thinned so they never overlap
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    let step = (values.len() / 10).max(1);
    for (i, day) in days.iter().enumerate().step_by(step) {
        let _ = ctx.fill_text(&day_axis_label(day.date), x_center(i) - 16.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max_never_zero() {
        assert_eq!(axis_max(&[]), 1.0);
        assert_eq!(axis_max(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_axis_max_headroom() {
        let max = axis_max(&[10.0, 40.0, 25.0]);
        assert!((max - 44.0).abs() < 1e-9);
    }
}
