//! Plotters-powered supplier bar chart widget for Ratatui.
//!
//! Bars are drawn on a segmented x axis (one segment per supplier) so the
//! supplier names land under the bar centres. Bar colour carries the OTIF
//! percentage.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One bar: supplier label, savings height and OTIF colour.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierBar {
    pub label: String,
    pub savings: f64,
    pub rgb: (u8, u8, u8),
}

/// A render-only chart description.
///
/// All bars and bounds are computed outside the render call so the data prep
/// can be tested without a terminal.
pub struct SupplierBarChart<'a> {
    pub bars: &'a [SupplierBar],
    /// Y bounds in USD; always include zero.
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for SupplierBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        // An empty month still gets axes: one blank segment.
        let segments = self.bars.len().max(1) as u32;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d((0u32..segments).into_segmented(), y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(self.bars.len().max(1))
                .y_labels(5)
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => self
                        .bars
                        .get(*i as usize)
                        .map(|b| b.label.clone())
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(self.bars.iter().enumerate().map(|(i, bar)| {
                let (r, g, b) = bar.rgb;
                let i = i as u32;
                let mut rect = Rectangle::new(
                    [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.savings)],
                    RGBColor(r, g, b).filled(),
                );
                rect.set_margin(0, 0, 1, 1);
                rect
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
