//! Connected-box archetypes: parallel lanes of cards and left-to-right flows.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, split, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, LineStyle, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Point, Rect};
use crate::models::shape::ShapeType;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Lane {
    #[serde(alias = "name")]
    title: String,
    items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LanesContent {
    lanes: Vec<Lane>,
}

/// Card slots of one lane; row `j` exists only if the lane has an item `j`.
struct LaneCards {
    slots: Vec<Rect>,
}

/// Parallel vertical lanes with a header band and a stack of cards each.
pub struct LanesRenderer;

impl DiagramRenderer for LanesRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Lanes
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: LanesContent = parse_content(self.kind(), data)?;
        let n = content.lanes.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let lane_gap = layout.diagram_x("laneGap");
        let lane_w = split(area.width, n, lane_gap);
        let title_h = layout.diagram_y("laneTitleH").min(area.height / 4.0);
        let pad = layout.diagram_x("lanePad");
        let card_gap = layout.diagram_y("laneCardGap");
        let rows = content.lanes.iter().map(|l| l.items.len()).max().unwrap_or(0).max(1);
        let available = (area.height - title_h - 2.0 * pad).max(0.0);
        let card_h = split(available, rows, card_gap).min(layout.diagram_y("laneCardMaxH"));
        debug!("[LanesRenderer::render] {n} lanes x {rows} rows, card {card_h:.1}pt");

        let mut placed: Vec<LaneCards> = Vec::with_capacity(n);
        for (i, lane) in content.lanes.iter().enumerate() {
            let left = area.left + i as f64 * (lane_w + lane_gap);
            canvas.rect(Rect::new(left, area.top, lane_w, area.height), &look.card);
            canvas.labeled_shape(
                ShapeType::Rectangle,
                Rect::new(left, area.top, lane_w, title_h),
                ShapeStyle::filled(&look.primary),
                &lane.title,
                &TextOptions::new(look.body, &look.on(&look.primary)).bold().center(),
            );

            let mut slots = Vec::with_capacity(lane.items.len());
            for (j, item) in lane.items.iter().enumerate() {
                let card = Rect::new(
                    left + pad,
                    area.top + title_h + pad + j as f64 * (card_h + card_gap),
                    (lane_w - 2.0 * pad).max(0.0),
                    card_h,
                );
                let size = fit_font_size(&strip_markup(item), card.width - 8.0, card.height - 4.0, look.body, look.small);
                canvas.labeled_shape(
                    ShapeType::RoundRectangle,
                    card,
                    ShapeStyle::outlined(&look.white, &look.border, 1.0),
                    item,
                    &TextOptions::new(size, &look.text).center(),
                );
                slots.push(card);
            }
            placed.push(LaneCards { slots });
        }

        for pair in placed.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            for (a, b) in from.slots.iter().zip(&to.slots) {
                canvas.line(
                    Point::new(a.right() + 2.0, a.center_y()),
                    Point::new(b.left - 2.0, a.center_y()),
                    LineStyle::arrow(&look.neutral, 1.5),
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Flow {
    steps: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlowContent {
    flows: Vec<Flow>,
    steps: Vec<String>,
}

impl FlowContent {
    /// Rows to draw, either `flows` or the single `steps` row.
    fn rows(self) -> Vec<Vec<String>> {
        let rows = if self.flows.is_empty() {
            vec![self.steps]
        } else {
            self.flows.into_iter().map(|f| f.steps).collect()
        };
        rows.into_iter().filter(|r| !r.is_empty()).collect()
    }
}

/// One or more rows of boxes joined by arrows.
pub struct FlowChartRenderer;

impl DiagramRenderer for FlowChartRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::FlowChart
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: FlowContent = parse_content(self.kind(), data)?;
        let rows = content.rows();
        if rows.is_empty() {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let arrow_gap = layout.diagram_x("flowArrowGap");
        let row_gap = layout.diagram_y("flowRowGap");
        let row_h = split(area.height, rows.len(), row_gap).min(layout.diagram_y("flowBoxMaxH"));

        for (r, steps) in rows.iter().enumerate() {
            let top = area.top + r as f64 * (row_h + row_gap);
            let box_w = split(area.width, steps.len(), arrow_gap);
            for (i, step) in steps.iter().enumerate() {
                let rect = Rect::new(area.left + i as f64 * (box_w + arrow_gap), top, box_w, row_h);
                let size = fit_font_size(&strip_markup(step), rect.width - 8.0, rect.height - 8.0, look.body, look.small);
                canvas.labeled_shape(
                    ShapeType::RoundRectangle,
                    rect,
                    ShapeStyle::outlined(&look.card, &look.primary, 1.5),
                    step,
                    &TextOptions::new(size, &look.text).center(),
                );
                if i + 1 < steps.len() && arrow_gap > 6.0 {
                    let y = rect.center_y();
                    canvas.line(
                        Point::new(rect.right() + 3.0, y),
                        Point::new(rect.right() + arrow_gap - 3.0, y),
                        LineStyle::arrow(&look.primary, 1.5),
                    );
                }
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

    /// Whole-box font size of the first text box holding `text`.
    fn size_of(intents: &[Intent], text: &str) -> Option<f64> {
        let at = intents
            .iter()
            .position(|i| matches!(i, Intent::InsertText { text: t, .. } if t == text))?;
        intents[at..].iter().find_map(|i| match i {
            Intent::StyleText { span: None, style, .. } => style.font_size,
            _ => None,
        })
    }

    #[test]
    fn ragged_lanes_only_connect_shared_rows() {
        let intents = render_json(
            DiagramKind::Lanes,
            json!({"lanes": [
                {"title": "Sales", "items": ["lead", "demo", "close"]},
                {"title": "Ops", "items": ["onboard"]}
            ]}),
        );
        assert_eq!(lines(&intents), 1);
        assert_inside(&intents, area());
    }

    #[test]
    fn empty_middle_lane_breaks_the_chain() {
        let intents = render_json(
            DiagramKind::Lanes,
            json!({"lanes": [
                {"title": "A", "items": ["1", "2"]},
                {"title": "B", "items": []},
                {"title": "C", "items": ["1", "2"]}
            ]}),
        );
        assert_eq!(lines(&intents), 0);
    }

    #[test]
    fn markup_does_not_shrink_the_card_font() {
        let words: Vec<&str> = std::iter::repeat("ab").take(60).collect();
        let plain = words.join(" ");
        let marked = words.iter().map(|w| format!("[[**{w}**]]")).collect::<Vec<_>>().join(" ");
        let render = |item: &str| {
            render_json(DiagramKind::Lanes, json!({"lanes": [{"title": "L", "items": [item]}]}))
        };
        let plain_size = size_of(&render(&plain), &plain).unwrap();
        let marked_size = size_of(&render(&marked), &plain).unwrap();
        assert_eq!(plain_size, marked_size);
    }

    #[test]
    fn flows_draw_one_arrow_between_neighbours() {
        let intents = render_json(
            DiagramKind::FlowChart,
            json!({"flows": [{"steps": ["a", "b", "c"]}, {"steps": ["d", "e"]}]}),
        );
        assert_eq!(lines(&intents), 3);
        assert_inside(&intents, area());

        let intents = render_json(DiagramKind::FlowChart, json!({"steps": ["x", "y"]}));
        assert_eq!(lines(&intents), 1);
    }
}
