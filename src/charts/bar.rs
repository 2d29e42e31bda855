use plotters::prelude::*;

use super::model::BarSeries;
use super::{draw_error, ChartImage, SKY_BLUE};
use crate::error::ChartError;

const SIZE: (u32, u32) = (1000, 600);

/// Horizontal bars, first point on top.
pub fn render_bar_chart(series: &BarSeries) -> Result<ChartImage, ChartError> {
    if series.values.is_empty() {
        return Err(ChartError::Empty("bar series has no points"));
    }

    let count = series.values.len() as i32;
    let max_value = series
        .values
        .iter()
        .map(|bar| bar.value)
        .fold(0f64, f64::max);
    let x_max = if max_value > 0.0 { max_value * 1.1 } else { 1.0 };

    // Segment `count - 1` is the top row of the chart.
    let label_at = |segment: i32| -> String {
        usize::try_from(count - 1 - segment)
            .ok()
            .and_then(|index| series.values.get(index))
            .map(|bar| bar.label.clone())
            .unwrap_or_default()
    };

    let bars: Vec<(SegmentValue<i32>, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(index, bar)| (SegmentValue::Exact(count - 1 - index as i32), bar.value))
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(series.title.as_str(), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(180)
            .build_cartesian_2d(0f64..x_max, (0..count).into_segmented())
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(series.x_label.as_str())
            .y_labels(series.values.len())
            .y_label_formatter(&|segment: &SegmentValue<i32>| match segment {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => label_at(*index),
                SegmentValue::Last => String::new(),
            })
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(SKY_BLUE.filled())
                    .margin(6)
                    .data(bars),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    Ok(ChartImage::from_svg(svg))
}
