//! Text-led archetypes: FAQ, quote and agenda.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, split, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::properties::Alignment;
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Faq {
    #[serde(alias = "question")]
    q: String,
    #[serde(alias = "answer")]
    a: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FaqContent {
    items: Vec<Faq>,
}

pub struct FaqRenderer;

impl DiagramRenderer for FaqRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Faq
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: FaqContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let gap = layout.diagram_y("faqGap");
        let block_h = split(area.height, n, gap);
        let accent_w = layout.diagram_x("cardAccentW");
        for (i, faq) in content.items.iter().enumerate() {
            let top = area.top + i as f64 * (block_h + gap);
            canvas.rect(Rect::new(area.left, top, accent_w, block_h), &look.primary);
            let left = area.left + accent_w + 10.0;
            let width = (area.right() - left).max(0.0);
            let question_h = block_h * 0.4;
            let question = format!("Q. {}", faq.q);
            let size = fit_font_size(&strip_markup(&question), width, question_h, look.body + 2.0, look.small);
            canvas.text_box(
                Rect::new(left, top, width, question_h),
                &question,
                &TextOptions::new(size, &look.primary)
                    .bold()
                    .valign(ContentAlignment::Bottom),
            );
            let answer = Rect::new(left, top + question_h, width, block_h - question_h);
            let size = fit_font_size(&strip_markup(&faq.a), answer.width, answer.height, look.body, look.small);
            canvas.text_box(
                answer,
                &faq.a,
                &TextOptions::new(size, &look.text).valign(ContentAlignment::Top),
            );
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteContent {
    text: String,
    author: String,
}

pub struct QuoteRenderer;

impl DiagramRenderer for QuoteRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Quote
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: QuoteContent = parse_content(self.kind(), data)?;
        if content.text.trim().is_empty() {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);
        let quote_max = layout.theme().font_size("quote");

        let mark = (quote_max * 3.0).min(area.height * 0.4);
        canvas.text_box(
            Rect::new(area.left, area.top, mark, mark),
            "“",
            &TextOptions::new(mark, &look.primary)
                .bold()
                .valign(ContentAlignment::Top),
        );

        let body = Rect::new(
            area.left + mark,
            area.top + area.height * 0.1,
            (area.width - 2.0 * mark).max(0.0),
            area.height * 0.6,
        );
        let size = fit_font_size(&strip_markup(&content.text), body.width, body.height, quote_max, look.body);
        canvas.text_box(body, &content.text, &TextOptions::new(size, &look.text).italic().center());

        if !content.author.trim().is_empty() {
            canvas.text_box(
                Rect::new(body.left, body.bottom() + 8.0, body.width, look.subhead * 2.0),
                &format!("— {}", content.author.trim()),
                &TextOptions::new(look.subhead, &look.muted)
                    .align(Alignment::End)
                    .valign(ContentAlignment::Top),
            );
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AgendaContent {
    items: Vec<String>,
}

/// Numbered agenda rows separated by hairlines.
pub struct AgendaRenderer;

impl DiagramRenderer for AgendaRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Agenda
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: AgendaContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let row_h = layout.diagram_y("agendaRowMaxH").min(area.height / n as f64);
        let number = layout.diagram_x("agendaNumSize").min(row_h);
        let text_left = area.left + number + 16.0;
        for (i, item) in content.items.iter().enumerate() {
            let top = area.top + i as f64 * row_h;
            canvas.labeled_shape(
                ShapeType::Ellipse,
                Rect::new(area.left, top + (row_h - number) / 2.0, number, number),
                ShapeStyle::filled(&look.primary),
                &(i + 1).to_string(),
                &TextOptions::new(look.body, &look.on(&look.primary)).bold().center(),
            );
            let text = Rect::new(text_left, top, (area.right() - text_left).max(0.0), row_h);
            let size = fit_font_size(&strip_markup(item), text.width, text.height, look.subhead, look.small);
            canvas.text_box(text, item, &TextOptions::new(size, &look.text));
            if i + 1 < n {
                let y = top + row_h;
                canvas.line(
                    Point::new(text_left, y),
                    Point::new(area.right(), y),
                    LineStyle::solid(&look.faint, 1.0),
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
    fn faq_blocks_stack() {
        let intents = render_json(
            DiagramKind::Faq,
            json!({"items": [{"q": "Why?", "a": "Because."}, {"question": "How?", "answer": "Like this."}]}),
        );
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "Q. How?")));
        assert_inside(&intents, area());
    }

    #[test]
    fn quote_with_author() {
        let intents = render_json(DiagramKind::Quote, json!({"text": "Stay hungry.", "author": "Steve"}));
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "— Steve")));
        assert!(intents.iter().any(|i| matches!(i, Intent::AlignParagraphs { alignment: Alignment::End, .. })));
        assert_inside(&intents, area());

        let intents = render_json(DiagramKind::Quote, json!({"text": "Anonymous wisdom"}));
        assert_eq!(shapes(&intents), 2);
    }

    #[test]
    fn agenda_separates_rows() {
        let intents = render_json(DiagramKind::Agenda, json!({"items": ["Intro", "Plan", "Q&A"]}));
        assert_eq!(lines(&intents), 2);
        assert_inside(&intents, area());
    }
}
