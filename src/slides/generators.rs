use log::{debug, warn};
use serde_json::Value as JsonValue;

use super::chrome::{bullets, content_title, footer, group_and_center, place_text};
use super::{region_or, PresentationGenerator, SlideContext, SlideKind};
use crate::canvas::{Canvas, IdGenerator, Intent, TextOptions};
use crate::deck::SlideSpec;
use crate::layout::Rect;
use crate::models::placeholder::PlaceholderType;
use crate::render::{cell_text, renderer_for, Look};
use crate::text::{fit_font_size, strip_markup};

impl PresentationGenerator {
    /// Builds the intents of one slide.
    pub fn generate_slide(
        &self,
        spec: &SlideSpec,
        kind: &SlideKind,
        ctx: &SlideContext,
        ids: &mut IdGenerator,
    ) -> Vec<Intent> {
        let theme = self.layout.theme();
        let mut canvas = Canvas::new(
            ids,
            self.settings.font_family(theme),
            self.settings.primary(theme),
        );
        match kind {
            SlideKind::Title => self.title_slide(&mut canvas, spec, ctx),
            SlideKind::Section => self.section_slide(&mut canvas, spec, ctx),
            SlideKind::Content => self.content_slide(&mut canvas, spec, ctx),
            SlideKind::Diagram { .. } => self.diagram_slide(&mut canvas, spec, kind, ctx),
        }
        if !matches!(kind, SlideKind::Title) {
            footer(&mut canvas, ctx, &self.settings, &self.layout);
        }
        if let Some(notes) = &spec.notes {
            canvas.speaker_notes(notes);
        }
        canvas.into_intents()
    }

    fn title_slide(&self, canvas: &mut Canvas<'_>, spec: &SlideSpec, ctx: &SlideContext) {
        let layout = &self.layout;
        let theme = layout.theme();
        let look = Look::new(&self.settings, layout);

        if let Some(url) = self.settings.logo_url.as_deref().filter(|u| !u.trim().is_empty()) {
            canvas.image(url, layout.get_rect("titleSlide.logo"));
        }

        let kinds = [PlaceholderType::CenteredTitle, PlaceholderType::Title];
        let rect = region_or(layout, ctx.placeholder(&kinds), "titleSlide.title");
        let max = theme.font_size("title");
        let size = fit_font_size(&strip_markup(&spec.title), rect.width, rect.height, max, look.subhead);
        let options = TextOptions::new(size, &look.text).bold();
        place_text(canvas, layout, ctx, &kinds, "titleSlide.title", &spec.title, &options);

        let subtitle = spec.subtitle.as_deref().or_else(|| spec.extra_str("date"));
        if let Some(subtitle) = subtitle {
            let options = TextOptions::new(theme.font_size("date"), &look.muted);
            place_text(canvas, layout, ctx, &[PlaceholderType::Subtitle], "titleSlide.date", subtitle, &options);
        }
    }

    fn section_slide(&self, canvas: &mut Canvas<'_>, spec: &SlideSpec, ctx: &SlideContext) {
        let layout = &self.layout;
        let theme = layout.theme();
        let look = Look::new(&self.settings, layout);

        let ghost = TextOptions::new(theme.font_size("ghostNum"), theme.color("ghostGray")).bold();
        canvas.text_box(
            layout.get_rect("sectionSlide.ghostNum"),
            &format!("{:02}", ctx.section_number),
            &ghost,
        );

        let kinds = [PlaceholderType::Title, PlaceholderType::CenteredTitle];
        let options = TextOptions::new(theme.font_size("sectionTitle"), &look.text).bold();
        place_text(canvas, layout, ctx, &kinds, "sectionSlide.title", &spec.title, &options);
    }

    fn content_slide(&self, canvas: &mut Canvas<'_>, spec: &SlideSpec, ctx: &SlideContext) {
        let layout = &self.layout;
        let look = Look::new(&self.settings, layout);
        content_title(canvas, spec, ctx, &self.settings, layout);

        let body = ctx.content_region();
        if let Some(placeholder) = body {
            canvas.remove(&placeholder.object_id);
        }
        let max = look.body + 4.0;

        if let Some((left, right)) = two_columns(spec) {
            let (left_rect, right_rect) = match body {
                Some(placeholder) => {
                    let r = placeholder.rect;
                    let gap = layout.to_pt_x(30.0);
                    let w = ((r.width - gap) / 2.0).max(0.0);
                    (
                        Rect::new(r.left, r.top, w, r.height),
                        Rect::new(r.left + w + gap, r.top, w, r.height),
                    )
                }
                None => (
                    layout.get_rect("contentSlide.twoColLeft"),
                    layout.get_rect("contentSlide.twoColRight"),
                ),
            };
            bullets(canvas, left_rect, &left, &look, max);
            bullets(canvas, right_rect, &right, &look, max);
            return;
        }

        let rect = region_or(layout, body, "contentSlide.body");
        bullets(canvas, rect, &spec.content, &look, max);
    }

    fn diagram_slide(&self, canvas: &mut Canvas<'_>, spec: &SlideSpec, kind: &SlideKind, ctx: &SlideContext) {
        let layout = &self.layout;
        content_title(canvas, spec, ctx, &self.settings, layout);

        let body = ctx.content_region();
        if let Some(placeholder) = body {
            canvas.remove(&placeholder.object_id);
        }
        let area = region_or(layout, body, "diagramSlide.area");
        if area.is_empty() {
            warn!("[diagram_slide] slide {}: empty work area, diagram skipped", ctx.index);
            return;
        }
        let Some(diagram) = kind.diagram_kind() else {
            warn!(
                "[diagram_slide] slide {}: no renderer for {:?}, diagram skipped",
                ctx.index,
                spec.diagram_type().unwrap_or(&spec.layout)
            );
            return;
        };

        let data = match spec.extra.get("data") {
            Some(data @ JsonValue::Object(_)) => data.clone(),
            _ => JsonValue::Object(spec.extra.clone()),
        };
        let mark = canvas.mark();
        if let Err(e) = renderer_for(diagram).render(canvas, &data, area, &self.settings, layout) {
            warn!("[diagram_slide] slide {}: {diagram} renderer failed: {e}", ctx.index);
            return;
        }
        debug!(
            "[diagram_slide] slide {}: {diagram} emitted {} intents",
            ctx.index,
            canvas.len() - mark
        );
        group_and_center(canvas, mark, area);
    }
}

/// Left and right bullet lists when the slide asks for two columns: either
/// `columns: [[...], [...]]`, or `twoColumn: true` splitting `content` in half.
fn two_columns(spec: &SlideSpec) -> Option<(Vec<String>, Vec<String>)> {
    if let Some(JsonValue::Array(columns)) = spec.extra.get("columns") {
        if let [JsonValue::Array(left), JsonValue::Array(right)] = columns.as_slice() {
            let lines = |values: &Vec<JsonValue>| values.iter().map(cell_text).collect::<Vec<_>>();
            return Some((lines(left), lines(right)));
        }
    }
    if spec.extra_bool("twoColumn") {
        let half = spec.content.len().div_ceil(2);
        let (left, right) = spec.content.split_at(half);
        return Some((left.to_vec(), right.to_vec()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutManager;
    use crate::settings::Settings;
    use serde_json::json;

    fn generate(settings: Settings, value: JsonValue) -> Vec<Intent> {
        let generator = PresentationGenerator::new(LayoutManager::with_default_theme(720.0, 405.0), settings);
        let spec: SlideSpec = serde_json::from_value(value).unwrap();
        let kind = SlideKind::of(&spec);
        let mut ids = IdGenerator::new("g");
        generator.generate_slide(&spec, &kind, &SlideContext::default(), &mut ids)
    }

    fn inserted(intents: &[Intent]) -> Vec<String> {
        intents
            .iter()
            .filter_map(|i| match i {
                Intent::InsertText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn two_column_from_explicit_columns() {
        let intents = generate(
            Settings::default(),
            json!({"title": "Pros & cons", "columns": [["fast", "cheap"], ["new"]]}),
        );
        let texts = inserted(&intents);
        assert!(texts.contains(&"• fast\n• cheap".to_string()));
        assert!(texts.contains(&"• new".to_string()));
    }

    #[test]
    fn two_column_flag_splits_content() {
        let spec = SlideSpec {
            content: vec!["a".into(), "b".into(), "c".into()],
            extra: json!({"twoColumn": true}).as_object().cloned().unwrap(),
            ..SlideSpec::default()
        };
        let (left, right) = two_columns(&spec).unwrap();
        assert_eq!(left, vec!["a", "b"]);
        assert_eq!(right, vec!["c"]);
    }

    #[test]
    fn chrome_follows_settings() {
        let settings = Settings {
            show_title_underline: false,
            show_bottom_bar: false,
            show_page_number: false,
            footer_text: Some(String::new()),
            ..Settings::default()
        };
        let intents = generate(settings, json!({"title": "Quiet"}));
        assert_eq!(inserted(&intents), vec!["Quiet"]);
        let shapes = intents.iter().filter(|i| matches!(i, Intent::CreateShape { .. })).count();
        assert_eq!(shapes, 1);
    }

    #[test]
    fn title_slide_uses_logo_and_date() {
        let settings = Settings {
            logo_url: Some("https://example.com/logo.png".into()),
            ..Settings::default()
        };
        let intents = generate(settings, json!({"layout": "TITLE", "title": "Kickoff", "date": "May 2024"}));
        assert!(matches!(intents[0], Intent::CreateImage { .. }));
        assert_eq!(inserted(&intents), vec!["Kickoff", "May 2024"]);
    }

    #[test]
    fn diagram_data_may_be_nested() {
        let intents = generate(
            Settings::default(),
            json!({"title": "KPIs", "diagramType": "kpi", "data": {"items": [{"label": "ARR", "value": "12M"}]}}),
        );
        assert!(inserted(&intents).iter().any(|t| t == "12M"));
    }

    #[test]
    fn notes_become_a_notes_intent() {
        let intents = generate(Settings::default(), json!({"title": "x", "notes": "remember"}));
        assert_eq!(
            intents.last(),
            Some(&Intent::SpeakerNotes { text: "remember".into() })
        );
    }
}
