//! Card grids with an accent bar per card.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, split, DiagramKind, DiagramRenderer, Item, Look, Result};
use crate::canvas::{Canvas, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Rect};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CardsContent {
    items: Vec<Item>,
    columns: Option<usize>,
}

/// Column count for `n` cards when the content does not pin one.
fn auto_columns(n: usize) -> usize {
    match n {
        0..=3 => n.max(1),
        4 => 2,
        _ => 3,
    }
}

/// A grid of cards, each with a colored accent bar on its left edge.
pub struct CardsRenderer;

impl DiagramRenderer for CardsRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Cards
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: CardsContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let columns = content
            .columns
            .filter(|c| *c > 0)
            .unwrap_or_else(|| auto_columns(n))
            .min(n);
        let rows = n.div_ceil(columns);
        let gap_x = layout.diagram_x("cardGap");
        let gap_y = layout.diagram_y("cardGap");
        let width = split(area.width, columns, gap_x);
        let height = split(area.height, rows, gap_y);
        let accent = layout.diagram_x("cardAccentW");
        debug!("[CardsRenderer::render] {n} cards in {columns}x{rows}, {width:.1}x{height:.1}pt");

        for (i, item) in content.items.iter().enumerate() {
            let (col, row) = (i % columns, i / columns);
            let card = Rect::new(
                area.left + col as f64 * (width + gap_x),
                area.top + row as f64 * (height + gap_y),
                width,
                height,
            );
            canvas.shape(
                ShapeType::RoundRectangle,
                card,
                ShapeStyle::outlined(&look.white, &look.border, 1.0),
            );
            canvas.rect(Rect::new(card.left, card.top, accent, card.height), &look.primary);

            let inner = Rect::new(
                card.left + accent + 8.0,
                card.top + 6.0,
                (card.width - accent - 14.0).max(0.0),
                (card.height - 12.0).max(0.0),
            );
            if item.desc.is_empty() {
                let size = fit_font_size(&strip_markup(&item.title), inner.width, inner.height, look.subhead, look.small);
                canvas.text_box(inner, &item.title, &TextOptions::new(size, &look.text).bold());
                continue;
            }
            let title_h = (inner.height * 0.35).min(look.subhead * 2.6);
            let title_rect = Rect::new(inner.left, inner.top, inner.width, title_h);
            let desc_rect = Rect::new(
                inner.left,
                inner.top + title_h,
                inner.width,
                (inner.height - title_h).max(0.0),
            );
            let title_size = fit_font_size(&strip_markup(&item.title), title_rect.width, title_rect.height, look.subhead, look.small);
            let desc_size = fit_font_size(&strip_markup(&item.desc), desc_rect.width, desc_rect.height, look.body, look.small);
            canvas.text_box(
                title_rect,
                &item.title,
                &TextOptions::new(title_size, &look.primary)
                    .bold()
                    .valign(ContentAlignment::Bottom),
            );
            canvas.text_box(
                desc_rect,
                &item.desc,
                &TextOptions::new(desc_size, &look.text).valign(ContentAlignment::Top),
            );
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

    #[test]
    fn column_rule() {
        assert_eq!(auto_columns(1), 1);
        assert_eq!(auto_columns(3), 3);
        assert_eq!(auto_columns(4), 2);
        assert_eq!(auto_columns(7), 3);
    }

    #[test]
    fn four_cards_make_a_two_by_two_grid() {
        let intents = render_json(
            DiagramKind::Cards,
            json!({"items": ["a", "b", {"title": "c", "desc": "details"}, "d"]}),
        );
        let cards: Vec<Rect> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape: ShapeType::RoundRectangle, rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].top, cards[1].top);
        assert!(cards[2].top > cards[0].top);
        assert_eq!(cards[0].left, cards[2].left);
        assert_inside(&intents, area());
        assert_eq!(
            count(&intents, |i| matches!(i, Intent::InsertText { .. })),
            5
        );
    }

    #[test]
    fn explicit_columns_win() {
        let intents = render_json(DiagramKind::Cards, json!({"items": ["a", "b", "c"], "columns": 1}));
        let tops: Vec<f64> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape: ShapeType::RoundRectangle, rect, .. } => Some(rect.top),
                _ => None,
            })
            .collect();
        assert!(tops[0] < tops[1] && tops[1] < tops[2]);
    }
}
