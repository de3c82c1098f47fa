//! The comparison family: side-by-side lists, a stats scorecard and paired bars.
//!
//! The three overlap in purpose but stay separate archetypes; see DESIGN.md.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{
    cell_text, ensure_area, number_of, parse_content, split, DiagramKind, DiagramRenderer, Look, Result,
};
use crate::canvas::{Canvas, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Rect};
use crate::models::properties::Alignment;
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparisonContent {
    left_title: String,
    right_title: String,
    left_items: Vec<String>,
    right_items: Vec<String>,
}

/// Two titled columns of bullet points.
pub struct ComparisonRenderer;

impl DiagramRenderer for ComparisonRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Comparison
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: ComparisonContent = parse_content(self.kind(), data)?;
        if content.left_items.is_empty() && content.right_items.is_empty() {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let gap = layout.diagram_x("compareGap");
        let column_w = split(area.width, 2, gap);
        let header_h = layout.diagram_y("compareHeaderH").min(area.height / 3.0);
        let sides = [
            (&content.left_title, &content.left_items, look.primary.clone()),
            (&content.right_title, &content.right_items, look.secondary.clone()),
        ];
        for (i, (title, items, accent)) in sides.iter().enumerate() {
            let left = area.left + i as f64 * (column_w + gap);
            let header = Rect::new(left, area.top, column_w, header_h);
            canvas.labeled_shape(
                ShapeType::Rectangle,
                header,
                ShapeStyle::filled(accent),
                title,
                &TextOptions::new(look.subhead, &look.on(accent)).bold().center(),
            );
            let body = Rect::new(left, header.bottom(), column_w, area.height - header_h);
            canvas.shape(
                ShapeType::Rectangle,
                body,
                ShapeStyle::outlined(&look.card, &look.border, 1.0),
            );
            if items.is_empty() {
                continue;
            }
            let text = items
                .iter()
                .map(|item| format!("• {item}"))
                .collect::<Vec<_>>()
                .join("\n");
            let inner = body.inset(14.0, 10.0);
            let size = fit_font_size(&strip_markup(&text), inner.width, inner.height, look.body, look.small);
            canvas.text_box(inner, &text, &TextOptions::new(size, &look.text).valign(ContentAlignment::Top));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Stat {
    label: String,
    left_value: JsonValue,
    right_value: JsonValue,
    trend: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatsContent {
    left_title: String,
    right_title: String,
    stats: Vec<Stat>,
}

/// Trend glyph and its palette role.
fn trend_glyph(trend: &str) -> Option<(&'static str, Trend)> {
    match trend.trim().to_lowercase().as_str() {
        "up" | "increase" | "better" => Some(("▲", Trend::Up)),
        "down" | "decrease" | "worse" => Some(("▼", Trend::Down)),
        "flat" | "same" | "neutral" => Some(("→", Trend::Flat)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Trend {
    Up,
    Down,
    Flat,
}

/// Column shares: label, left value, right value.
const STATS_COLUMNS: [f64; 3] = [0.4, 0.3, 0.3];

/// A two-column scorecard with shaded alternate rows.
pub struct StatsCompareRenderer;

impl DiagramRenderer for StatsCompareRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::StatsCompare
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: StatsContent = parse_content(self.kind(), data)?;
        let n = content.stats.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let header_h = layout.diagram_y("compareHeaderH").min(area.height / (n + 1) as f64);
        let row_h = layout
            .diagram_y("compareRowMaxH")
            .min((area.height - header_h) / n as f64);
        let widths = STATS_COLUMNS.map(|share| area.width * share);
        let xs = [area.left, area.left + widths[0], area.left + widths[0] + widths[1]];
        // Trend glyphs get their own slot at the end of the right column.
        let has_trends = content
            .stats
            .iter()
            .any(|s| s.trend.as_deref().and_then(trend_glyph).is_some());
        let glyph_w = if has_trends { (look.subhead * 1.5).min(widths[2] / 2.0) } else { 0.0 };
        debug!("[StatsCompareRenderer::render] {n} rows of {row_h:.1}pt");

        for (col, (title, accent)) in [
            (&content.left_title, &look.primary),
            (&content.right_title, &look.secondary),
        ]
        .into_iter()
        .enumerate()
        {
            canvas.labeled_shape(
                ShapeType::Rectangle,
                Rect::new(xs[col + 1], area.top, widths[col + 1], header_h),
                ShapeStyle::filled(accent),
                title,
                &TextOptions::new(look.body, &look.on(accent)).bold().center(),
            );
        }

        for (i, stat) in content.stats.iter().enumerate() {
            let top = area.top + header_h + i as f64 * row_h;
            if i % 2 == 0 {
                canvas.rect(Rect::new(area.left, top, area.width, row_h), &look.card);
            }
            canvas.text_box(
                Rect::new(xs[0] + 10.0, top, widths[0] - 10.0, row_h),
                &stat.label,
                &TextOptions::new(look.body, &look.text),
            );
            canvas.text_box(
                Rect::new(xs[1], top, widths[1], row_h),
                &cell_text(&stat.left_value),
                &TextOptions::new(look.subhead, &look.text).bold().center(),
            );
            canvas.text_box(
                Rect::new(xs[2], top, widths[2] - glyph_w, row_h),
                &cell_text(&stat.right_value),
                &TextOptions::new(look.subhead, &look.text).bold().center(),
            );
            if let Some((glyph, trend)) = stat.trend.as_deref().and_then(trend_glyph) {
                let color = match trend {
                    Trend::Up => &look.positive,
                    Trend::Down => &look.negative,
                    Trend::Flat => &look.neutral,
                };
                canvas.text_box(
                    Rect::new(area.right() - glyph_w, top, glyph_w, row_h),
                    glyph,
                    &TextOptions::new(look.subhead, color).center(),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BarContent {
    left_title: String,
    right_title: String,
    stats: Vec<Stat>,
}

/// Share of the row given to the label.
const BAR_LABEL_SHARE: f64 = 0.25;

/// Paired horizontal bars per row, normalized to one shared maximum.
pub struct BarCompareRenderer;

impl DiagramRenderer for BarCompareRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::BarCompare
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: BarContent = parse_content(self.kind(), data)?;
        let n = content.stats.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let values: Vec<(f64, f64)> = content
            .stats
            .iter()
            .map(|s| {
                (
                    number_of(&s.left_value).unwrap_or(0.0).max(0.0),
                    number_of(&s.right_value).unwrap_or(0.0).max(0.0),
                )
            })
            .collect();
        let max = values.iter().fold(0.0_f64, |m, (a, b)| m.max(*a).max(*b));
        let max = if max > 0.0 { max } else { 1.0 };

        let legend_h = (look.body * 2.0).min(area.height / (n + 1) as f64);
        let legend_w = split(area.width, 2, 0.0);
        for (i, (title, color)) in [
            (&content.left_title, &look.primary),
            (&content.right_title, &look.neutral),
        ]
        .into_iter()
        .enumerate()
        {
            if title.is_empty() {
                continue;
            }
            canvas.text_box(
                Rect::new(area.left + i as f64 * legend_w, area.top, legend_w, legend_h),
                &format!("■ {title}"),
                &TextOptions::new(look.body, color).bold(),
            );
        }

        let gap = layout.diagram_y("barRowGap");
        let row_h = split(area.height - legend_h, n, gap).min(layout.diagram_y("compareRowMaxH") * 1.5);
        let label_w = area.width * BAR_LABEL_SHARE;
        let value_w = look.body * 4.0;
        let bar_left = area.left + label_w + 8.0;
        let bar_max = (area.right() - value_w - bar_left).max(0.0);
        let bar_h = ((row_h - 4.0) / 2.0).max(0.0);
        debug!("[BarCompareRenderer::render] {n} rows, shared max {max}");

        for (i, (stat, (left, right))) in content.stats.iter().zip(values).enumerate() {
            let top = area.top + legend_h + i as f64 * (row_h + gap);
            canvas.text_box(
                Rect::new(area.left, top, label_w, row_h),
                &stat.label,
                &TextOptions::new(look.body, &look.text).align(Alignment::End),
            );
            for (j, (value, raw, color)) in [
                (left, &stat.left_value, &look.primary),
                (right, &stat.right_value, &look.neutral),
            ]
            .into_iter()
            .enumerate()
            {
                let bar_top = top + j as f64 * (bar_h + 4.0);
                let width = bar_max * value / max;
                if width > 0.0 {
                    canvas.rect(Rect::new(bar_left, bar_top, width, bar_h), color);
                }
                canvas.text_box(
                    Rect::new(bar_left + width + 4.0, bar_top, value_w - 4.0, bar_h),
                    &cell_text(raw),
                    &TextOptions::new(look.small, &look.text).bold(),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Intent;
    use crate::render::test_support::{area, assert_inside, count, render_json};
    use serde_json::json;

    fn rects(intents: &[Intent]) -> Vec<Rect> {
        intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape: ShapeType::Rectangle, rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Footprint of the box that received `text`.
    fn box_of(intents: &[Intent], text: &str) -> Rect {
        let at = intents
            .iter()
            .position(|i| matches!(i, Intent::InsertText { text: t, .. } if t == text))
            .unwrap();
        intents[..at]
            .iter()
            .rev()
            .find_map(|i| match i {
                Intent::CreateShape { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn comparison_draws_two_columns() {
        let intents = render_json(
            DiagramKind::Comparison,
            json!({"leftTitle": "Before", "rightTitle": "After", "leftItems": ["slow"], "rightItems": []}),
        );
        // header and body per side
        assert_eq!(rects(&intents).len(), 4);
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "• slow")));
        assert_inside(&intents, area());
    }

    #[test]
    fn stats_shade_alternate_rows_and_mark_trends() {
        let intents = render_json(
            DiagramKind::StatsCompare,
            json!({"leftTitle": "2023", "rightTitle": "2024", "stats": [
                {"label": "Revenue", "leftValue": 10, "rightValue": "12", "trend": "up"},
                {"label": "Churn", "leftValue": "5%", "rightValue": "7%", "trend": "down"},
                {"label": "NPS", "leftValue": 40, "rightValue": 40}
            ]}),
        );
        // two headers plus rows 0 and 2 shaded
        assert_eq!(rects(&intents).len(), 4);
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "▲")));
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "▼")));
        assert_inside(&intents, area());
    }

    #[test]
    fn trend_glyph_sits_beside_the_right_value() {
        let intents = render_json(
            DiagramKind::StatsCompare,
            json!({"stats": [{"label": "Revenue", "leftValue": 10, "rightValue": "12", "trend": "up"}]}),
        );
        let value = box_of(&intents, "12");
        let glyph = box_of(&intents, "▲");
        assert!(value.right() <= glyph.left + 1e-9);
        assert!((glyph.right() - area().right()).abs() < 1e-9);

        let intents = render_json(
            DiagramKind::StatsCompare,
            json!({"stats": [{"label": "Revenue", "leftValue": 10, "rightValue": "12"}]}),
        );
        assert!((box_of(&intents, "12").right() - area().right()).abs() < 1e-9);
    }

    #[test]
    fn bars_share_one_maximum() {
        let intents = render_json(
            DiagramKind::BarCompare,
            json!({"leftTitle": "A", "rightTitle": "B", "stats": [
                {"label": "x", "leftValue": 50, "rightValue": 100},
                {"label": "y", "leftValue": "25", "rightValue": 0}
            ]}),
        );
        let bars = rects(&intents);
        // the zero value draws no bar
        assert_eq!(bars.len(), 3);
        assert!((bars[1].width - 2.0 * bars[0].width).abs() < 1e-6);
        assert!((bars[2].width - bars[0].width / 2.0).abs() < 1e-6);
        assert_inside(&intents, area());
    }

    #[test]
    fn all_zero_values_do_not_divide_by_zero() {
        let intents = render_json(
            DiagramKind::BarCompare,
            json!({"stats": [{"label": "x", "leftValue": 0, "rightValue": 0}]}),
        );
        assert_eq!(rects(&intents).len(), 0);
        assert_eq!(count(&intents, |i| matches!(i, Intent::InsertText { .. })), 3);
    }
}
