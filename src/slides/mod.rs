//! Slide generators: per-category orchestration of chrome, work area, diagram
//! dispatch and post-render grouping.
//!
//! Generators never touch a surface directly. They produce one [`SlidePlan`] per
//! slide, and [`apply_intents`] replays it on whichever backend is active.

use log::{debug, error, info};

use crate::canvas::{IdGenerator, Intent};
use crate::deck::SlideSpec;
use crate::layout::{LayoutManager, Rect};
use crate::models::placeholder::PlaceholderType;
use crate::models::requests::PredefinedLayout;
use crate::render::DiagramKind;
use crate::settings::Settings;
use crate::surface::{apply_intents, PlaceholderRegion, PresentationSurface};

mod chrome;
mod generators;

/// Slide category, decided once from the slide's `layout` and diagram fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Section,
    Content,
    /// `raw` is the diagram type string as written, if any.
    Diagram { raw: Option<String> },
}

impl SlideKind {
    pub fn of(spec: &SlideSpec) -> Self {
        let layout = spec.layout.trim().to_uppercase();
        match layout.as_str() {
            "TITLE" | "TITLE_SLIDE" | "COVER" => return SlideKind::Title,
            "SECTION" | "SECTION_HEADER" => return SlideKind::Section,
            _ => {}
        }
        if let Some(raw) = spec.diagram_type() {
            return SlideKind::Diagram {
                raw: Some(raw.to_string()),
            };
        }
        if layout == "DIAGRAM" {
            return SlideKind::Diagram { raw: None };
        }
        if DiagramKind::parse(&spec.layout).is_some() {
            return SlideKind::Diagram {
                raw: Some(spec.layout.clone()),
            };
        }
        SlideKind::Content
    }

    /// Diagram archetype for a diagram slide.
    pub fn diagram_kind(&self) -> Option<DiagramKind> {
        match self {
            SlideKind::Diagram { raw: Some(raw) } => DiagramKind::parse(raw),
            _ => None,
        }
    }

    fn predefined_layout(&self) -> PredefinedLayout {
        match self {
            SlideKind::Title => PredefinedLayout::Title,
            SlideKind::Section => PredefinedLayout::SectionHeader,
            SlideKind::Content => PredefinedLayout::TitleAndBody,
            SlideKind::Diagram { .. } => PredefinedLayout::TitleOnly,
        }
    }
}

/// What a generator knows about the slide it is filling.
#[derive(Debug, Clone, Default)]
pub struct SlideContext {
    /// Zero-based position in the deck.
    pub index: usize,
    /// One-based number of the current section.
    pub section_number: usize,
    /// Placeholders present on the live slide.
    pub placeholders: Vec<PlaceholderRegion>,
}

impl SlideContext {
    pub fn placeholder(&self, kinds: &[PlaceholderType]) -> Option<&PlaceholderRegion> {
        self.placeholders.iter().find(|p| kinds.contains(&p.kind))
    }

    /// First BODY/OBJECT/PICTURE placeholder with a usable rectangle.
    pub fn content_region(&self) -> Option<&PlaceholderRegion> {
        self.placeholders
            .iter()
            .find(|p| p.kind.is_content_region() && !p.rect.is_empty())
    }
}

/// Everything needed to build one slide on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidePlan {
    pub slide_id: String,
    pub layout: PredefinedLayout,
    pub intents: Vec<Intent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub slides: usize,
    pub failed_slides: usize,
    pub skipped_intents: usize,
}

/// Turns slide specs into drawing intents for one presentation.
///
/// Holds only read-only inputs, so one instance can serve any number of decks.
#[derive(Debug, Clone)]
pub struct PresentationGenerator {
    pub(crate) layout: LayoutManager,
    pub(crate) settings: Settings,
    use_layout_placeholders: bool,
}

impl PresentationGenerator {
    pub fn new(layout: LayoutManager, settings: Settings) -> Self {
        PresentationGenerator {
            layout,
            settings,
            use_layout_placeholders: false,
        }
    }

    /// Bind slides to matching predefined layouts and draw into their
    /// placeholders instead of placing everything on blank slides.
    ///
    /// Only [`generate_into`](Self::generate_into) honors this, since placeholder
    /// geometry has to be read back from a live surface. [`plan`](Self::plan)
    /// always targets blank slides.
    pub fn with_layout_placeholders(mut self, enabled: bool) -> Self {
        self.use_layout_placeholders = enabled;
        self
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn layout_for(&self, kind: &SlideKind) -> PredefinedLayout {
        if self.use_layout_placeholders {
            kind.predefined_layout()
        } else {
            PredefinedLayout::Blank
        }
    }

    /// Plans every slide without a surface. Slide ids come from `ids`.
    ///
    /// There are no placeholders to read here, so every plan uses the blank
    /// layout and draws its own chrome.
    pub fn plan(&self, slides: &[SlideSpec], ids: &mut IdGenerator) -> Vec<SlidePlan> {
        let mut section = 0;
        slides
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let kind = SlideKind::of(spec);
                section = next_section_number(section, spec, &kind);
                let ctx = SlideContext {
                    index,
                    section_number: section,
                    placeholders: Vec::new(),
                };
                let slide_id = ids.next_id();
                let intents = self.generate_slide(spec, &kind, &ctx, ids);
                debug!("[plan] slide {index} ({kind:?}) -> {} intents", intents.len());
                SlidePlan {
                    slide_id,
                    layout: PredefinedLayout::Blank,
                    intents,
                }
            })
            .collect()
    }

    /// Appends and draws every slide on `surface`.
    ///
    /// A slide that cannot be appended is logged and skipped; failing intents are
    /// skipped one by one. Nothing here aborts the deck.
    pub fn generate_into<S>(
        &self,
        surface: &mut S,
        slides: &[SlideSpec],
        ids: &mut IdGenerator,
    ) -> GenerationReport
    where
        S: PresentationSurface + ?Sized,
    {
        let mut report = GenerationReport::default();
        let mut section = 0;
        for (index, spec) in slides.iter().enumerate() {
            let kind = SlideKind::of(spec);
            section = next_section_number(section, spec, &kind);
            let slide_id = match surface.append_slide(self.layout_for(&kind)) {
                Ok(id) => id,
                Err(e) => {
                    error!("[generate_into] slide {index} could not be created: {e}");
                    report.failed_slides += 1;
                    continue;
                }
            };
            let placeholders = if self.use_layout_placeholders {
                surface.placeholders(&slide_id)
            } else {
                Vec::new()
            };
            let ctx = SlideContext {
                index,
                section_number: section,
                placeholders,
            };
            let intents = self.generate_slide(spec, &kind, &ctx, ids);
            report.skipped_intents += apply_intents(surface, &slide_id, &intents);
            report.slides += 1;
        }
        info!(
            "[generate_into] {} slides generated, {} failed, {} intents skipped",
            report.slides, report.failed_slides, report.skipped_intents
        );
        report
    }
}

/// Section counter after `spec`. `sectionNo` on a section slide resets it.
fn next_section_number(current: usize, spec: &SlideSpec, kind: &SlideKind) -> usize {
    if *kind != SlideKind::Section {
        return current;
    }
    match spec.extra.get("sectionNo").and_then(serde_json::Value::as_u64) {
        Some(n) => n as usize,
        None => current + 1,
    }
}

/// Rect of a placeholder or, failing that, a theme region.
pub(crate) fn region_or(layout: &LayoutManager, placeholder: Option<&PlaceholderRegion>, path: &str) -> Rect {
    placeholder
        .map(|p| p.rect)
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| layout.get_rect(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::test_support::FakeSurface;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> SlideSpec {
        serde_json::from_value(value).unwrap()
    }

    fn generator() -> PresentationGenerator {
        PresentationGenerator::new(LayoutManager::with_default_theme(720.0, 405.0), Settings::default())
    }

    fn texts(intents: &[Intent]) -> Vec<&str> {
        intents
            .iter()
            .filter_map(|i| match i {
                Intent::InsertText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn slide_kind_from_layout_and_type() {
        assert_eq!(SlideKind::of(&spec(json!({"layout": "title"}))), SlideKind::Title);
        assert_eq!(SlideKind::of(&spec(json!({"layout": "SECTION_HEADER"}))), SlideKind::Section);
        assert_eq!(SlideKind::of(&spec(json!({}))), SlideKind::Content);
        let kind = SlideKind::of(&spec(json!({"layout": "DIAGRAM", "diagramType": "statsCompare"})));
        assert_eq!(kind.diagram_kind(), Some(DiagramKind::StatsCompare));
        let kind = SlideKind::of(&spec(json!({"layout": "timeline"})));
        assert_eq!(kind.diagram_kind(), Some(DiagramKind::Timeline));
        assert_eq!(
            SlideKind::of(&spec(json!({"layout": "DIAGRAM"}))),
            SlideKind::Diagram { raw: None }
        );
    }

    #[test]
    fn section_numbers_are_threaded() {
        let slides = vec![
            spec(json!({"layout": "SECTION", "title": "A"})),
            spec(json!({"title": "body"})),
            spec(json!({"layout": "SECTION", "title": "B"})),
            spec(json!({"layout": "SECTION", "title": "C", "sectionNo": 7})),
            spec(json!({"layout": "SECTION", "title": "D"})),
        ];
        let plans = generator().plan(&slides, &mut IdGenerator::new("s"));
        let ghost = |plan: &SlidePlan| texts(&plan.intents)[0].to_string();
        assert_eq!(ghost(&plans[0]), "01");
        assert_eq!(ghost(&plans[2]), "02");
        assert_eq!(ghost(&plans[3]), "07");
        assert_eq!(ghost(&plans[4]), "08");

        // a second run starts over
        let again = generator().plan(&slides[..1], &mut IdGenerator::new("s"));
        assert_eq!(ghost(&again[0]), "01");
    }

    #[test]
    fn title_slides_have_no_footer() {
        let slides = vec![
            spec(json!({"layout": "TITLE", "title": "Deck", "subtitle": "2024"})),
            spec(json!({"title": "Agenda", "content": ["one", "two"]})),
        ];
        let plans = generator().plan(&slides, &mut IdGenerator::new("s"));
        assert_eq!(texts(&plans[0].intents), vec!["Deck", "2024"]);
        let content = texts(&plans[1].intents);
        assert!(content.contains(&"• one\n• two"));
        assert!(content.contains(&"2"));
        assert!(plans.iter().all(|p| p.layout == PredefinedLayout::Blank));
    }

    #[test]
    fn diagram_content_is_grouped_and_centered() {
        let slides = vec![spec(json!({
            "title": "Roadmap",
            "diagramType": "cards",
            "items": [{"title": "A"}, {"title": "B"}]
        }))];
        let plans = generator().plan(&slides, &mut IdGenerator::new("s"));
        let intents = &plans[0].intents;
        let group_id = intents
            .iter()
            .find_map(|i| match i {
                Intent::Group { id, children } => {
                    assert!(children.len() >= 2);
                    Some(id.clone())
                }
                _ => None,
            })
            .expect("diagram was not grouped");
        assert!(intents
            .iter()
            .all(|i| !matches!(i, Intent::Translate { id, .. } if id != &group_id)));
    }

    #[test]
    fn unknown_diagram_type_keeps_the_slide() {
        let _ = env_logger::builder().is_test(true).try_init();
        let slides = vec![spec(json!({"title": "Odd", "diagramType": "hologram", "items": [1, 2]}))];
        let plans = generator().plan(&slides, &mut IdGenerator::new("s"));
        let intents = &plans[0].intents;
        assert!(texts(intents).contains(&"Odd"));
        assert!(!intents.iter().any(|i| matches!(i, Intent::Group { .. })));
    }

    #[test]
    fn planning_ignores_layout_placeholders() {
        let slides = vec![
            spec(json!({"layout": "TITLE", "title": "Deck"})),
            spec(json!({"title": "T", "content": ["x"]})),
        ];
        let plans = generator()
            .with_layout_placeholders(true)
            .plan(&slides, &mut IdGenerator::new("s"));
        for plan in &plans {
            assert_eq!(plan.layout, PredefinedLayout::Blank);
            assert!(!plan.intents.iter().any(|i| matches!(i, Intent::Remove { .. })));
        }
        // chrome is drawn in full since nothing comes from the layout
        assert!(texts(&plans[1].intents).contains(&"T"));
    }

    #[test]
    fn body_placeholder_wins_and_is_removed() {
        let mut surface = FakeSurface::default();
        surface.placeholders = vec![PlaceholderRegion {
            object_id: "ph_body".into(),
            kind: PlaceholderType::Body,
            rect: Rect::new(40.0, 120.0, 600.0, 220.0),
        }];
        surface.known.push("ph_body".into());
        let slides = vec![spec(json!({"title": "Points", "content": ["x"]}))];
        let report = generator()
            .with_layout_placeholders(true)
            .generate_into(&mut surface, &slides, &mut IdGenerator::new("s"));
        assert_eq!(report, GenerationReport { slides: 1, failed_slides: 0, skipped_intents: 0 });
        assert!(surface.calls[0].ends_with("TitleAndBody"));
        assert!(surface.calls.iter().any(|c| c == "remove ph_body"));
    }
}
