//! Progress bars with percentage labels.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, number_of, parse_content, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Rect};
use crate::models::properties::Alignment;
use crate::models::shape::ShapeType;
use crate::settings::Settings;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProgressItem {
    label: String,
    #[serde(alias = "value", alias = "progress")]
    percent: JsonValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProgressContent {
    items: Vec<ProgressItem>,
}

const LABEL_SHARE: f64 = 0.3;

/// Labeled progress bars; percentages are clamped to `0..=100`.
pub struct ProgressRenderer;

impl DiagramRenderer for ProgressRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Progress
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: ProgressContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let row_h = layout.diagram_y("progressRowMaxH").min(area.height / n as f64);
        let bar_h = layout.diagram_y("progressBarH").min(row_h);
        let label_w = area.width * LABEL_SHARE;
        let percent_w = look.body * 4.0;
        let track_left = area.left + label_w + 10.0;
        let track_w = (area.right() - percent_w - track_left).max(0.0);

        for (i, item) in content.items.iter().enumerate() {
            let top = area.top + i as f64 * row_h;
            let percent = number_of(&item.percent).unwrap_or(0.0).clamp(0.0, 100.0);
            canvas.text_box(
                Rect::new(area.left, top, label_w, row_h),
                &item.label,
                &TextOptions::new(look.body, &look.text),
            );
            let bar_top = top + (row_h - bar_h) / 2.0;
            canvas.shape(
                ShapeType::RoundRectangle,
                Rect::new(track_left, bar_top, track_w, bar_h),
                ShapeStyle::filled(&look.light),
            );
            let fill_w = track_w * percent / 100.0;
            if fill_w > 0.0 {
                canvas.shape(
                    ShapeType::RoundRectangle,
                    Rect::new(track_left, bar_top, fill_w, bar_h),
                    ShapeStyle::filled(&look.primary),
                );
            }
            canvas.text_box(
                Rect::new(area.right() - percent_w, top, percent_w, row_h),
                &format!("{}%", percent.round()),
                &TextOptions::new(look.body, &look.primary)
                    .bold()
                    .align(Alignment::End),
            );
        }
        Ok(())
    }
}
