//! Circular cycle diagrams.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, DiagramKind, DiagramRenderer, Item, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::color::cycle_colors;
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::properties::Alignment;
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CycleContent {
    items: Vec<Item>,
    center_text: Option<String>,
}

/// Nodes at or right of center within this many points read left to right.
const SIDE_EPSILON: f64 = 0.5;

/// Items on a ring starting at twelve o'clock, labels on the outside.
pub struct CycleRenderer;

impl DiagramRenderer for CycleRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Cycle
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: CycleContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let label_w = layout.diagram_x("cycleLabelW").min(area.width / 4.0);
        let connector = layout.diagram_x("cycleConnector");
        let node = layout.diagram_x("cycleNodeMax").min(area.height / 3.0);
        let radius = ((area.height - node) / 2.0)
            .min((area.width - 2.0 * (label_w + connector) - node) / 2.0)
            .max(0.0);
        let (cx, cy) = (area.center_x(), area.center_y());
        let colors = cycle_colors(&look.primary, n);
        debug!("[CycleRenderer::render] {n} nodes, radius {radius:.1}pt, node {node:.1}pt");

        canvas.shape(
            ShapeType::Ellipse,
            Rect::new(cx - radius, cy - radius, 2.0 * radius, 2.0 * radius),
            ShapeStyle::ring(&look.faint, 2.0),
        );
        if let Some(center) = content.center_text.as_deref().filter(|t| !t.is_empty()) {
            let inner = Rect::new(cx - radius * 0.6, cy - radius * 0.35, radius * 1.2, radius * 0.7);
            let size = fit_font_size(&strip_markup(center), inner.width, inner.height, look.subhead, look.small);
            canvas.text_box(inner, center, &TextOptions::new(size, &look.text).bold().center());
        }

        for (i, item) in content.items.iter().enumerate() {
            let angle = (-90.0 + i as f64 * 360.0 / n as f64).to_radians();
            let (x, y) = (cx + radius * angle.cos(), cy + radius * angle.sin());
            let fill = &colors[i];
            canvas.labeled_shape(
                ShapeType::Ellipse,
                Rect::new(x - node / 2.0, y - node / 2.0, node, node),
                ShapeStyle::filled(fill),
                &(i + 1).to_string(),
                &TextOptions::new(look.subhead, &look.on(fill)).bold().center(),
            );

            let right_side = x - cx >= -SIDE_EPSILON;
            let (from, to, label_left, align) = if right_side {
                let start = x + node / 2.0;
                (start, start + connector, start + connector, Alignment::Start)
            } else {
                let end = x - node / 2.0;
                (end - connector, end, end - connector - label_w, Alignment::End)
            };
            canvas.line(
                Point::new(from, y),
                Point::new(to, y),
                LineStyle::solid(&look.neutral, 1.0),
            );

            let label_left = label_left.clamp(area.left, (area.right() - label_w).max(area.left));
            let label_h = node.max(look.body * 3.0).min(area.height);
            let label_top = (y - label_h / 2.0).clamp(area.top, (area.bottom() - label_h).max(area.top));
            let label = Rect::new(label_left, label_top, label_w, label_h);
            if item.desc.is_empty() {
                canvas.text_box(label, &item.title, &TextOptions::new(look.body, &look.text).bold().align(align));
            } else {
                let half = label.height / 2.0;
                canvas.text_box(
                    Rect::new(label.left, label.top, label.width, half),
                    &item.title,
                    &TextOptions::new(look.body, &look.text)
                        .bold()
                        .align(align)
                        .valign(ContentAlignment::Bottom),
                );
                canvas.text_box(
                    Rect::new(label.left, label.top + half, label.width, half),
                    &item.desc,
                    &TextOptions::new(look.small, &look.muted)
                        .align(align)
                        .valign(ContentAlignment::Top),
                );
            }
        }
        Ok(())
    }
}
