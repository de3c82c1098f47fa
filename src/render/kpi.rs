//! KPI scorecards.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{cell_text, ensure_area, parse_content, split, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, ShapeStyle, TextOptions};
use crate::layout::{LayoutManager, Rect};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{estimate_text_width, fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Kpi {
    label: String,
    value: JsonValue,
    change: JsonValue,
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KpiContent {
    items: Vec<Kpi>,
    columns: Option<usize>,
}

const MAX_AUTO_COLUMNS: usize = 4;

/// Metric cards: label, large value and a change line colored by status.
pub struct KpiRenderer;

impl DiagramRenderer for KpiRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::Kpi
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: KpiContent = parse_content(self.kind(), data)?;
        let n = content.items.len();
        if n == 0 {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);
        let value_max = layout.theme().font_size("kpiValue");

        let columns = content
            .columns
            .filter(|c| *c > 0)
            .unwrap_or(n.min(MAX_AUTO_COLUMNS))
            .min(n);
        let rows = n.div_ceil(columns);
        let gap_x = layout.diagram_x("kpiGap");
        let gap_y = layout.diagram_y("kpiGap");
        let width = split(area.width, columns, gap_x);
        let height = split(area.height, rows, gap_y);

        for (i, kpi) in content.items.iter().enumerate() {
            let card = Rect::new(
                area.left + (i % columns) as f64 * (width + gap_x),
                area.top + (i / columns) as f64 * (height + gap_y),
                width,
                height,
            );
            canvas.shape(
                ShapeType::RoundRectangle,
                card,
                ShapeStyle::outlined(&look.white, &look.border, 1.0),
            );
            let inner = card.inset(10.0, 8.0);
            let label_h = inner.height * 0.25;
            let value_h = inner.height * 0.45;
            canvas.text_box(
                Rect::new(inner.left, inner.top, inner.width, label_h),
                &kpi.label,
                &TextOptions::new(look.small, &look.muted)
                    .center()
                    .valign(ContentAlignment::Bottom),
            );

            let value = cell_text(&kpi.value);
            let mut size = fit_font_size(&strip_markup(&value), inner.width, value_h, value_max, look.body);
            // values rarely wrap well, so shrink further to keep one line
            while size > look.body && estimate_text_width(&value, size) > inner.width {
                size -= 1.0;
            }
            canvas.text_box(
                Rect::new(inner.left, inner.top + label_h, inner.width, value_h),
                &value,
                &TextOptions::new(size, &look.primary).bold().center(),
            );

            let change = cell_text(&kpi.change);
            if !change.is_empty() {
                let color = match kpi.status.as_deref().map(str::to_lowercase).as_deref() {
                    Some("good") | Some("positive") | Some("up") => &look.positive,
                    Some("bad") | Some("negative") | Some("down") => &look.negative,
                    _ => &look.muted,
                };
                canvas.text_box(
                    Rect::new(
                        inner.left,
                        inner.top + label_h + value_h,
                        inner.width,
                        inner.height - label_h - value_h,
                    ),
                    &change,
                    &TextOptions::new(look.small, color)
                        .center()
                        .valign(ContentAlignment::Top),
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
    use crate::render::test_support::{area, assert_inside, render_json};
    use serde_json::json;

    #[test]
    fn status_colors_the_change_line() {
        let intents = render_json(
            DiagramKind::Kpi,
            json!({"items": [
                {"label": "Revenue", "value": "$1.2M", "change": "+12%", "status": "good"},
                {"label": "Churn", "value": 3.4, "change": "+1pt", "status": "bad"},
                {"label": "Users", "value": 1200}
            ]}),
        );
        let colors: Vec<String> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::StyleText { span: None, style, .. } => style.color.clone(),
                _ => None,
            })
            .collect();
        assert!(colors.contains(&"#34a853".to_string()));
        assert!(colors.contains(&"#ea4335".to_string()));
        assert!(intents.iter().any(|i| matches!(i, Intent::InsertText { text, .. } if text == "3.4")));
        assert_inside(&intents, area());
    }

    #[test]
    fn five_items_wrap_to_a_second_row() {
        let intents = render_json(
            DiagramKind::Kpi,
            json!({"items": [{"label": "a", "value": 1}, {"label": "b", "value": 2}, {"label": "c", "value": 3},
                             {"label": "d", "value": 4}, {"label": "e", "value": 5}]}),
        );
        let tops: Vec<f64> = intents
            .iter()
            .filter_map(|i| match i {
                Intent::CreateShape { shape: ShapeType::RoundRectangle, rect, .. } => Some(rect.top),
                _ => None,
            })
            .collect();
        assert_eq!(tops.len(), 5);
        assert_eq!(tops[0], tops[3]);
        assert!(tops[4] > tops[0]);
    }
}
