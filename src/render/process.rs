//! Sequential archetypes: an indented vertical process and ascending step-up bars.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, ratio, split, DiagramKind, DiagramRenderer, Item, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::color::{process_colors, step_up_colors};
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProcessContent {
    #[serde(alias = "items")]
    steps: Vec<String>,
}

pub struct ProcessRenderer;

impl DiagramRenderer for ProcessRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Process
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: ProcessContent = parse_content(self.kind(), data)?;
        let n = content.steps.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let gap = layout.diagram_y("processGap").max(if n > 1 { 8.0 } else { 0.0 });
        let row_h = split(area.height, n, gap);
        let number_w = layout.diagram_x("processNumberW").min(area.width / 4.0);
        let indent = layout.diagram_x("processIndent").min(area.width / 4.0);
        let colors = process_colors(&look.primary, n);
        debug!("[ProcessRenderer::render] {n} steps, row {row_h:.1}pt, indent up to {indent:.1}pt");

        for (i, step) in content.steps.iter().enumerate() {
            let top = area.top + i as f64 * (row_h + gap);
            let left = area.left + indent * ratio(i, n);
            let number = Rect::new(left, top, number_w, row_h);
            let fill = &colors[i];
            canvas.labeled_shape(
                ShapeType::Rectangle,
                number,
                ShapeStyle::filled(fill),
                &format!("{:02}", i + 1),
                &TextOptions::new(look.subhead, &look.on(fill)).bold().center(),
            );
            let card = Rect::new(number.right(), top, (area.right() - number.right()).max(0.0), row_h);
            let size = fit_font_size(&strip_markup(step), card.width - 24.0, card.height - 8.0, look.body, look.small);
            canvas.shape(ShapeType::Rectangle, card, ShapeStyle::filled(&look.card));
            canvas.text_box(card.inset(12.0, 2.0), step, &TextOptions::new(size, &look.text));

            if i + 1 < n && gap > 0.0 {
                let x = number.center_x();
                canvas.line(
                    Point::new(x, number.bottom()),
                    Point::new(x, number.bottom() + gap),
                    LineStyle::arrow(&look.neutral, 1.5),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StepUpContent {
    #[serde(alias = "steps")]
    items: Vec<Item>,
}

/// Smallest bar as a share of the area height.
const STEP_UP_MIN: f64 = 0.35;

/// Bars rising left to right, heights interpolated by position.
pub struct StepUpRenderer;

impl DiagramRenderer for StepUpRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::StepUp
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: StepUpContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let gap = layout.diagram_x("stepUpGap");
        let width = split(area.width, n, gap);
        let colors = step_up_colors(&look.primary, n);

        for (i, item) in content.items.iter().enumerate() {
            let height = area.height * (STEP_UP_MIN + (1.0 - STEP_UP_MIN) * ratio(i, n));
            let bar = Rect::new(
                area.left + i as f64 * (width + gap),
                area.bottom() - height,
                width,
                height,
            );
            let fill = &colors[i];
            let ink = look.on(fill);
            canvas.shape(ShapeType::Rectangle, bar, ShapeStyle::filled(fill));

            let inner = bar.inset(6.0, 6.0);
            let title_h = if item.desc.is_empty() {
                inner.height
            } else {
                (inner.height * 0.4).min(look.subhead * 2.6)
            };
            let title_rect = Rect::new(inner.left, inner.top, inner.width, title_h);
            let size = fit_font_size(&strip_markup(&item.title), title_rect.width, title_rect.height, look.subhead, look.small);
            canvas.text_box(
                title_rect,
                &item.title,
                &TextOptions::new(size, &ink).bold().valign(ContentAlignment::Top),
            );
            if !item.desc.is_empty() {
                let desc_rect = Rect::new(
                    inner.left,
                    inner.top + title_h,
                    inner.width,
                    (inner.height - title_h).max(0.0),
                );
                let size = fit_font_size(&strip_markup(&item.desc), desc_rect.width, desc_rect.height, look.body, look.small);
                canvas.text_box(
                    desc_rect,
                    &item.desc,
                    &TextOptions::new(size, &ink).valign(ContentAlignment::Top),
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
    use crate::render::test_support::{area, assert_inside, lines, render_json};
    use serde_json::json;

    fn rects_of(intents: &[Intent], kind: ShapeType) -> Vec<Rect> {
        intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape, rect, .. } if *shape == kind => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn process_indents_and_connects_rows() {
        let intents = render_json(DiagramKind::Process, json!({"steps": ["one", "two", "three"]}));
        let rects = rects_of(&intents, ShapeType::Rectangle);
        // number box and card per step
        assert_eq!(rects.len(), 6);
        assert!(rects[2].left > rects[0].left);
        assert!(rects[4].left > rects[2].left);
        assert_eq!(lines(&intents), 2);
        assert_inside(&intents, area());
    }

    #[test]
    fn single_step_has_no_arrow() {
        let intents = render_json(DiagramKind::Process, json!({"steps": ["only"]}));
        assert_eq!(lines(&intents), 0);
    }

    #[test]
    fn step_up_bars_rise_to_full_height() {
        let intents = render_json(
            DiagramKind::StepUp,
            json!({"items": ["a", {"title": "b", "desc": "more"}, "c", "d"]}),
        );
        let bars = rects_of(&intents, ShapeType::Rectangle);
        assert_eq!(bars.len(), 4);
        for pair in bars.windows(2) {
            assert!(pair[1].height > pair[0].height);
            assert!((pair[0].bottom() - pair[1].bottom()).abs() < 1e-6);
        }
        assert!((bars[3].height - area().height).abs() < 1e-6);
        assert!((bars[0].height - area().height * STEP_UP_MIN).abs() < 1e-6);
    }
}
