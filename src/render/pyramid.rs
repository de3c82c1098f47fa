//! Hierarchy archetypes: a stacked pyramid and a three-point triangle.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, ratio, split, DiagramKind, DiagramRenderer, Item, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::color::{process_colors, pyramid_colors};
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PyramidContent {
    #[serde(alias = "items")]
    levels: Vec<Item>,
}

/// Share of the area width used by the pyramid itself.
const PYRAMID_COLUMN: f64 = 0.45;
/// Width of the top level relative to the base.
const PYRAMID_APEX: f64 = 0.3;

pub struct PyramidRenderer;

impl DiagramRenderer for PyramidRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Pyramid
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: PyramidContent = parse_content(self.kind(), data)?;
        let n = content.levels.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let column_w = area.width * PYRAMID_COLUMN;
        let gap = layout.diagram_y("pyramidGap");
        let level_h = split(area.height, n, gap);
        let text_gap = layout.diagram_x("pyramidTextGap");
        let desc_left = area.left + column_w + text_gap;
        let desc_w = (area.right() - desc_left).max(0.0);
        let colors = pyramid_colors(&look.primary, n);
        debug!("[PyramidRenderer::render] {n} levels, {level_h:.1}pt each");

        for (i, level) in content.levels.iter().enumerate() {
            let width = column_w * (PYRAMID_APEX + (1.0 - PYRAMID_APEX) * ratio(i, n));
            let block = Rect::new(
                area.left + (column_w - width) / 2.0,
                area.top + i as f64 * (level_h + gap),
                width,
                level_h,
            );
            let fill = &colors[i];
            let size = fit_font_size(&strip_markup(&level.title), block.width - 8.0, block.height - 4.0, look.subhead, look.small);
            canvas.labeled_shape(
                ShapeType::Rectangle,
                block,
                ShapeStyle::filled(fill),
                &level.title,
                &TextOptions::new(size, &look.on(fill)).bold().center(),
            );

            if level.desc.is_empty() || desc_w <= 0.0 {
                continue;
            }
            let y = block.center_y();
            canvas.line(
                Point::new(block.right() + 4.0, y),
                Point::new(desc_left - 4.0, y),
                LineStyle::solid(&look.neutral, 1.0).dashed(),
            );
            let desc = Rect::new(desc_left, block.top, desc_w, block.height);
            let size = fit_font_size(&strip_markup(&level.desc), desc.width, desc.height, look.body, look.small);
            canvas.text_box(desc, &level.desc, &TextOptions::new(size, &look.text));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TriangleContent {
    items: Vec<Item>,
}

/// A central triangle with up to three cards at its corners.
pub struct TriangleRenderer;

impl DiagramRenderer for TriangleRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Triangle
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: TriangleContent = parse_content(self.kind(), data)?;
        if content.items.is_empty() {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);
        let items = &content.items[..content.items.len().min(3)];
        if content.items.len() > 3 {
            debug!(
                "[TriangleRenderer::render] drawing 3 of {} items",
                content.items.len()
            );
        }

        let gap = layout.diagram_x("cardGap");
        let card_w = area.width * 0.3;
        let card_h = area.height * 0.32;
        let tri_h = (area.height - card_h - gap).max(0.0);
        let tri_w = (area.width - 2.0 * (card_w + gap)).min(tri_h * 1.15).max(0.0);
        canvas.shape(
            ShapeType::Triangle,
            Rect::new(area.center_x() - tri_w / 2.0, area.bottom() - tri_h, tri_w, tri_h),
            ShapeStyle::filled(&look.light),
        );

        let slots = [
            Rect::new(area.center_x() - card_w / 2.0, area.top, card_w, card_h),
            Rect::new(area.left, area.bottom() - card_h, card_w, card_h),
            Rect::new(area.right() - card_w, area.bottom() - card_h, card_w, card_h),
        ];
        let colors = process_colors(&look.primary, 3);
        for ((item, card), accent) in items.iter().zip(slots).zip(&colors) {
            canvas.shape(
                ShapeType::RoundRectangle,
                card,
                ShapeStyle::outlined(&look.white, accent, 2.0),
            );
            let inner = card.inset(8.0, 6.0);
            let title_h = if item.desc.is_empty() { inner.height } else { inner.height * 0.4 };
            let size = fit_font_size(&strip_markup(&item.title), inner.width, title_h, look.subhead, look.small);
            canvas.text_box(
                Rect::new(inner.left, inner.top, inner.width, title_h),
                &item.title,
                &TextOptions::new(size, accent).bold().center(),
            );
            if !item.desc.is_empty() {
                let desc = Rect::new(inner.left, inner.top + title_h, inner.width, inner.height - title_h);
                let size = fit_font_size(&strip_markup(&item.desc), desc.width, desc.height, look.body, look.small);
                canvas.text_box(
                    desc,
                    &item.desc,
                    &TextOptions::new(size, &look.text).center().valign(ContentAlignment::Top),
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
    use crate::render::test_support::{area, assert_inside, lines, render_json, shapes};
    use serde_json::json;

    #[test]
    fn levels_widen_towards_the_base() {
        let intents = render_json(
            DiagramKind::Pyramid,
            json!({"levels": [
                {"title": "Vision", "description": "why"},
                "Strategy",
                {"title": "Tactics", "description": "how"}
            ]}),
        );
        let blocks: Vec<Rect> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape: ShapeType::Rectangle, rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].width < blocks[1].width && blocks[1].width < blocks[2].width);
        assert!((blocks[0].center_x() - blocks[2].center_x()).abs() < 1e-6);
        // only described levels get a connector
        assert_eq!(lines(&intents), 2);
        assert_inside(&intents, area());
    }

    #[test]
    fn triangle_uses_at_most_three_items() {
        let intents = render_json(DiagramKind::Triangle, json!({"items": ["a", "b", "c", "d", "e"]}));
        let cards = intents
            .iter()
            .filter(|i| matches!(i, Intent::CreateShape { shape: ShapeType::RoundRectangle, .. }))
            .count();
        assert_eq!(cards, 3);
        assert_inside(&intents, area());

        let intents = render_json(DiagramKind::Triangle, json!({"items": ["solo"]}));
        // triangle, one card and its title
        assert_eq!(shapes(&intents), 3);
    }
}
