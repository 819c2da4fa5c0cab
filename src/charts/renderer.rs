//! Static Chart Renderer
//! Renders the ranking table as a horizontal bar chart PNG with plotters.
//!
//! Layout:
//! 1. Title and subtitle centered at the top
//! 2. One bar per course, most preferred (lowest mean rank) on top
//! 3. Course names on the y-axis, mean rank on the x-axis
//! 4. Mean value printed at the end of each bar

use crate::config::ChartConfig;
use crate::stats::{CourseRanking, RankingTable};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use thiserror::Error;

/// Font family every text element is drawn with.
const FONT_FAMILY: &str = "sans-serif";

// Embedded so rendering does not depend on fonts installed on the host.
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Viridis samples, dark to light, assigned top to bottom.
pub const PALETTE: [RGBColor; 8] = [
    RGBColor(68, 1, 84),
    RGBColor(70, 51, 126),
    RGBColor(54, 92, 141),
    RGBColor(39, 127, 142),
    RGBColor(31, 161, 135),
    RGBColor(74, 193, 109),
    RGBColor(159, 218, 58),
    RGBColor(253, 231, 37),
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load embedded chart font")]
    Font,
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
}

pub struct BarChartRenderer;

impl BarChartRenderer {
    /// Render `table` and encode it as a PNG at `path`, replacing any existing file.
    pub fn render_png(
        table: &RankingTable,
        chart: &ChartConfig,
        path: &Path,
    ) -> Result<(), RenderError> {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
            .map_err(|_| RenderError::Font)?;

        let root = BitMapBackend::new(path, (chart.width, chart.height)).into_drawing_area();
        Self::draw_chart(&root, table, chart)
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        root.present()
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        Ok(())
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        table: &RankingTable,
        chart: &ChartConfig,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let area = root.titled(&chart.title, (FONT_FAMILY, 24))?;
        let area = area.titled(&chart.subtitle, (FONT_FAMILY, 16))?;

        let rankings = table.rankings();
        let n = rankings.len();
        let x_max = Self::x_upper_bound(rankings);

        // Segment `pos` counts from the bottom; rank 0 sits in the top segment.
        let position = |rank: usize| n - 1 - rank;
        let names: Vec<&str> = rankings.iter().map(|r| r.course_name.as_str()).collect();
        let label_for = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(pos) if *pos < n => names[n - 1 - *pos].to_string(),
            _ => String::new(),
        };

        let mut cc = ChartBuilder::on(&area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(Self::label_area_width(&names, chart.width))
            .build_cartesian_2d(
                0f64..x_max,
                (0usize..n.saturating_sub(1).max(1)).into_segmented(),
            )?;

        cc.configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&label_for)
            .x_label_formatter(&|x| format!("{:.1}", x))
            .x_desc(chart.x_label.as_str())
            .axis_desc_style((FONT_FAMILY, 16))
            .label_style((FONT_FAMILY, 14))
            .draw()?;

        cc.draw_series(
            rankings
                .iter()
                .enumerate()
                .filter(|(_, r)| r.mean_rank.is_finite())
                .map(|(rank, r)| {
                    let pos = position(rank);
                    let color = PALETTE[rank % PALETTE.len()];
                    let mut bar = Rectangle::new(
                        [
                            (0.0, SegmentValue::Exact(pos)),
                            (r.mean_rank, SegmentValue::Exact(pos + 1)),
                        ],
                        color.filled(),
                    );
                    bar.set_margin(6, 6, 0, 0);
                    bar
                }),
        )?;

        let value_style = TextStyle::from((FONT_FAMILY, 13).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));

        cc.draw_series(rankings.iter().enumerate().map(|(rank, r)| {
            let (x, text) = if r.mean_rank.is_finite() {
                (r.mean_rank, format!("{:.2}", r.mean_rank))
            } else {
                (0.0, "no data".to_string())
            };
            EmptyElement::at((x, SegmentValue::CenterOf(position(rank))))
                + Text::new(text, (5, 0), value_style.clone())
        }))?;

        Ok(())
    }

    /// Right end of the x-axis: the largest finite mean plus headroom for value labels.
    fn x_upper_bound(rankings: &[CourseRanking]) -> f64 {
        let max = rankings
            .iter()
            .map(|r| r.mean_rank)
            .filter(|m| m.is_finite())
            .fold(0.0_f64, f64::max);

        if max > 0.0 {
            max * 1.15
        } else {
            1.0
        }
    }

    /// Pixels reserved for course names, capped at half the image width.
    fn label_area_width(names: &[&str], image_width: u32) -> u32 {
        let longest = names.iter().map(|n| n.chars().count()).max().unwrap_or(0) as u32;
        (longest * 8 + 20).clamp(60, image_width / 2)
    }
}
