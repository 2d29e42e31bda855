//! Chart rendering. Every call draws into its own in-memory SVG document, so renders are
//! independent of each other and never touch a display.

pub mod bar;
pub mod line;
pub mod model;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use plotters::style::RGBColor;

use crate::data::{RankingTable, TimeSeries};
use crate::error::ChartError;

pub use bar::render_bar_chart;
pub use line::render_line_chart;
pub use model::{BarPoint, BarSeries, LineSeries, TOP_N};

pub(crate) const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub(crate) const LINE_GREEN: RGBColor = RGBColor(0, 128, 0);

/// A rendered chart, base64-encoded for inline embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub mime: &'static str,
    pub base64: String,
}

impl ChartImage {
    pub fn from_svg(svg: String) -> Self {
        Self {
            mime: "image/svg+xml",
            base64: STANDARD.encode(svg.as_bytes()),
        }
    }

    /// `data:` URI usable as an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }

    pub fn decode_text(&self) -> Option<String> {
        let bytes = STANDARD.decode(&self.base64).ok()?;
        String::from_utf8(bytes).ok()
    }
}

/// Top-10 bar chart of a ranking.
pub fn ranking_chart(table: &RankingTable) -> Result<ChartImage, ChartError> {
    render_bar_chart(&BarSeries::top_of_ranking(table))
}

/// Line chart of one region's series.
pub fn trend_chart(series: &TimeSeries) -> Result<ChartImage, ChartError> {
    render_line_chart(&LineSeries::from_time_series(series))
}

pub(crate) fn draw_error<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_carries_mime_and_payload() {
        let image = ChartImage::from_svg("<svg/>".to_string());
        assert_eq!(image.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
        assert_eq!(image.decode_text().as_deref(), Some("<svg/>"));
    }
}
