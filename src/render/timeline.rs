//! Horizontal milestone timelines.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::color::timeline_colors;
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Milestone {
    date: String,
    #[serde(alias = "title")]
    label: String,
    state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimelineContent {
    milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Done,
    Next,
    Todo,
}

impl State {
    fn of(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("done") | Some("complete") | Some("completed") => State::Done,
            Some("next") | Some("current") | Some("active") => State::Next,
            _ => State::Todo,
        }
    }
}

/// Milestones along one horizontal axis, each with a connector, label card and date.
pub struct TimelineRenderer;

impl DiagramRenderer for TimelineRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Timeline
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: TimelineContent = parse_content(self.kind(), data)?;
        let n = content.milestones.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let pad = layout.diagram_x("timelinePad").min(area.width / 4.0);
        let axis_y = area.top + area.height * 0.65;
        let (x0, x1) = (area.left + pad, area.right() - pad);
        let step = if n > 1 { (x1 - x0) / (n - 1) as f64 } else { x1 - x0 };
        let card_w = (step * 0.9).min(layout.diagram_x("timelineCardMaxW"));
        let dot = layout.diagram_x("timelineDotSize");
        let connector_h = layout.diagram_y("timelineConnectorH");
        let label_h = layout.diagram_y("timelineLabelH");
        let date_h = layout.diagram_y("timelineDateH");
        let colors = timeline_colors(&look.primary, n);
        debug!("[TimelineRenderer::render] {n} milestones, step {step:.1}pt, card {card_w:.1}pt");

        canvas.line(
            Point::new(x0, axis_y),
            Point::new(x1, axis_y),
            LineStyle::solid(&look.neutral, 2.0),
        );

        for (i, milestone) in content.milestones.iter().enumerate() {
            let x = if n == 1 {
                area.center_x()
            } else {
                x0 + i as f64 * step
            };
            let connector_top = (axis_y - dot / 2.0 - connector_h).max(area.top);
            canvas.line(
                Point::new(x, connector_top),
                Point::new(x, axis_y - dot / 2.0),
                LineStyle::solid(&look.faint, 1.5),
            );

            let card_left = (x - card_w / 2.0).clamp(area.left, (area.right() - card_w).max(area.left));
            let label_top = (connector_top - label_h).max(area.top);
            let label = Rect::new(card_left, label_top, card_w, connector_top - label_top);
            let fill = &colors[i];
            let size = fit_font_size(&strip_markup(&milestone.label), label.width - 8.0, label.height - 6.0, look.body, look.small);
            canvas.labeled_shape(
                ShapeType::RoundRectangle,
                label,
                ShapeStyle::filled(fill),
                &milestone.label,
                &TextOptions::new(size, &look.on(fill)).center(),
            );

            if !milestone.date.is_empty() {
                let date_top = (label.top - date_h - 4.0).max(area.top);
                canvas.text_box(
                    Rect::new(card_left, date_top, card_w, (label.top - date_top).max(0.0)),
                    &milestone.date,
                    &TextOptions::new(look.small, &look.primary)
                        .bold()
                        .center()
                        .valign(ContentAlignment::Bottom),
                );
            }

            let dot_rect = Rect::new(x - dot / 2.0, axis_y - dot / 2.0, dot, dot);
            let style = match State::of(milestone.state.as_deref()) {
                State::Done => ShapeStyle::filled(&look.primary),
                State::Next => ShapeStyle::outlined(&look.white, &look.primary, 2.0),
                State::Todo => ShapeStyle::filled(&look.neutral),
            };
            canvas.shape(ShapeType::Ellipse, dot_rect, style);
        }
        Ok(())
    }
}
