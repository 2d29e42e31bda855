use plotters::prelude::*;

use super::model::LineSeries;
use super::{draw_error, ChartImage, LINE_GREEN};
use crate::error::ChartError;

const SIZE: (u32, u32) = (1000, 500);

/// Marker + line over the years, with grid.
pub fn render_line_chart(series: &LineSeries) -> Result<ChartImage, ChartError> {
    let (Some(first), Some(last)) = (series.points.first(), series.points.last()) else {
        return Err(ChartError::Empty("line series has no points"));
    };

    let x_range = if first.0 == last.0 {
        first.0 - 1..last.0 + 1
    } else {
        first.0..last.0
    };
    let (low, high) = series
        .points
        .iter()
        .fold((f64::MAX, f64::MIN), |(low, high), (_, value)| {
            (low.min(*value), high.max(*value))
        });
    let pad = if high > low {
        (high - low) * 0.1
    } else {
        high.abs().max(1.0) * 0.05
    };
    let year_count = (x_range.end - x_range.start + 1) as usize;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(series.title.as_str(), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(72)
            .build_cartesian_2d(x_range, (low - pad)..(high + pad))
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc(series.x_label.as_str())
            .y_desc(series.y_label.as_str())
            .x_labels(year_count.min(15))
            .x_label_formatter(&|year: &i32| year.to_string())
            .y_label_formatter(&|value: &f64| format!("{value:.0}"))
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(plotters::series::LineSeries::new(
                series.points.iter().copied(),
                LINE_GREEN.stroke_width(2),
            ))
            .map_err(draw_error)?;
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|&(year, value)| Circle::new((year, value), 4, LINE_GREEN.filled())),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    Ok(ChartImage::from_svg(svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: Vec<(i32, f64)>) -> LineSeries {
        LineSeries {
            title: "Zmiana ceny 1m² mieszkań – Lubuskie".to_string(),
            x_label: "Rok".to_string(),
            y_label: "Cena (zł)".to_string(),
            points,
        }
    }

    #[test]
    fn renders_title_and_axis_labels() {
        let points = vec![(2010, 3000.0), (2011, 3100.0), (2012, 3300.0)];
        let image = render_line_chart(&series(points)).unwrap();
        let svg = image.decode_text().unwrap();
        assert!(svg.contains("Lubuskie"));
        assert!(svg.contains("Rok"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn single_point_series_renders() {
        assert!(render_line_chart(&series(vec![(2015, 4200.0)])).is_ok());
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            render_line_chart(&series(Vec::new())),
            Err(ChartError::Empty(_))
        ));
    }
}
