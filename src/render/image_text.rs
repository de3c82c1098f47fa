//! Image and text side by side.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{ensure_area, parse_content, split, DiagramKind, DiagramRenderer, Look, Result};
use crate::canvas::{Canvas, TextOptions};
use crate::layout::{LayoutManager, Rect};
use crate::models::shape_properties::ContentAlignment;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImageTextContent {
    #[serde(alias = "imageUrl")]
    image: Option<String>,
    caption: Option<String>,
    #[serde(alias = "items")]
    points: Vec<String>,
    image_position: Option<String>,
}

/// An image beside a list of points; either half may be missing.
pub struct ImageTextRenderer;

impl DiagramRenderer for ImageTextRenderer {
    fn kind(&self) -> DiagramKind {
        DiagramKind::ImageText
    }

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()> {
        let content: ImageTextContent = parse_content(self.kind(), data)?;
        let image = content.image.as_deref().map(str::trim).filter(|u| !u.is_empty());
        if image.is_none() && content.points.is_empty() {
            return Ok(());
        }
        ensure_area(area)?;
        let look = Look::new(settings, layout);

        let gap = layout.diagram_x("imageTextGap");
        let image_right = content
            .image_position
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("right"));
        let (image_area, text_area) = match (image, content.points.is_empty()) {
            (Some(_), false) => {
                let half = split(area.width, 2, gap);
                let first = Rect::new(area.left, area.top, half, area.height);
                let second = Rect::new(area.left + half + gap, area.top, half, area.height);
                if image_right {
                    (second, first)
                } else {
                    (first, second)
                }
            }
            _ => (area, area),
        };

        if let Some(url) = image {
            let caption = content.caption.as_deref().filter(|c| !c.trim().is_empty());
            let caption_h = if caption.is_some() { look.small * 2.4 } else { 0.0 };
            canvas.image(
                url,
                Rect::new(
                    image_area.left,
                    image_area.top,
                    image_area.width,
                    (image_area.height - caption_h).max(0.0),
                ),
            );
            if let Some(caption) = caption {
                canvas.text_box(
                    Rect::new(image_area.left, image_area.bottom() - caption_h, image_area.width, caption_h),
                    caption,
                    &TextOptions::new(look.small, &look.muted).center(),
                );
            }
        }

        if !content.points.is_empty() {
            let text = content
                .points
                .iter()
                .map(|p| format!("• {p}"))
                .collect::<Vec<_>>()
                .join("\n");
            let size = fit_font_size(&strip_markup(&text), text_area.width, text_area.height, look.subhead, look.small);
            canvas.text_box(
                text_area,
                &text,
                &TextOptions::new(size, &look.text).valign(ContentAlignment::Middle),
            );
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

    fn image_rect(intents: &[Intent]) -> Option<Rect> {
        intents.iter().find_map(|i| match i {
            Intent::CreateImage { rect, .. } => Some(*rect),
            _ => None,
        })
    }

    #[test]
    fn image_side_follows_position() {
        let data = json!({"image": "https://example.com/a.png", "points": ["one"], "imagePosition": "right"});
        let intents = render_json(DiagramKind::ImageText, data);
        let rect = image_rect(&intents).unwrap();
        assert!(rect.left > area().center_x());
        assert_inside(&intents, area());

        let intents = render_json(DiagramKind::ImageText, json!({"image": "https://example.com/a.png", "points": ["one"]}));
        assert_eq!(image_rect(&intents).unwrap().left, area().left);
    }

    #[test]
    fn lone_image_fills_the_area() {
        let intents = render_json(
            DiagramKind::ImageText,
            json!({"image": "https://example.com/a.png", "caption": "Figure 1"}),
        );
        let rect = image_rect(&intents).unwrap();
        assert_eq!(rect.width, area().width);
        assert!(rect.height < area().height);
    }

    #[test]
    fn blank_url_counts_as_missing() {
        assert!(render_json(DiagramKind::ImageText, json!({"image": "  "})).is_empty());
    }
}
