//! The presentation-surface contract and the single adapter that replays intents
//! against it.
//!
//! A surface is anything that can hold slides: [`BatchRecorder`] turns every call
//! into a `batchUpdate` request, a live client or a test double can draw directly.

use log::{debug, warn};
use thiserror::Error;

use crate::canvas::{Intent, LineStyle, ShapeStyle, TextSpan, TextStyleSpec, TextTarget};
use crate::errors::SlidesApiError;
use crate::layout::{Point, Rect};
use crate::models::common::dimension_to_pt;
use crate::models::page::Page;
use crate::models::placeholder::PlaceholderType;
use crate::models::properties::Alignment;
use crate::models::requests::PredefinedLayout;
use crate::models::shape::ShapeType;

mod batch;

pub use batch::BatchRecorder;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Unknown object id: {0}")]
    UnknownObject(String),

    #[error("Surface rejected {operation}: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    #[error("Presentation service error: {0}")]
    Api(#[from] SlidesApiError),
}

pub type Result<T> = std::result::Result<T, SurfaceError>;

/// A placeholder on a live slide, in page points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderRegion {
    pub object_id: String,
    pub kind: PlaceholderType,
    pub rect: Rect,
}

/// Operations the generators need from a presentation service.
///
/// Geometry is absolute page points; colors are hex strings.
pub trait PresentationSurface {
    /// Appends a slide and returns its object id.
    fn append_slide(&mut self, layout: PredefinedLayout) -> Result<String>;

    /// Placeholders present on a slide. Surfaces without live geometry return none.
    fn placeholders(&self, slide_id: &str) -> Vec<PlaceholderRegion>;

    fn insert_shape(&mut self, slide_id: &str, id: &str, shape: ShapeType, rect: Rect) -> Result<()>;

    fn insert_line(&mut self, slide_id: &str, id: &str, from: Point, to: Point) -> Result<()>;

    fn insert_table(
        &mut self,
        slide_id: &str,
        id: &str,
        rows: usize,
        columns: usize,
        rect: Rect,
    ) -> Result<()>;

    fn insert_image(&mut self, slide_id: &str, id: &str, url: &str, rect: Rect) -> Result<()>;

    fn set_shape_style(&mut self, id: &str, style: &ShapeStyle) -> Result<()>;

    fn set_line_style(&mut self, id: &str, style: &LineStyle) -> Result<()>;

    fn set_text(&mut self, target: &TextTarget, text: &str) -> Result<()>;

    /// Styles `span`, or the whole text when `span` is `None`.
    fn set_text_style(
        &mut self,
        target: &TextTarget,
        span: Option<TextSpan>,
        style: &TextStyleSpec,
    ) -> Result<()>;

    fn set_paragraph_alignment(&mut self, target: &TextTarget, alignment: Alignment) -> Result<()>;

    fn set_cell_fill(&mut self, table_id: &str, row: usize, column: usize, color: &str) -> Result<()>;

    fn group(&mut self, group_id: &str, children: &[String]) -> Result<()>;

    /// Moves an element by a delta.
    fn translate(&mut self, id: &str, dx: f64, dy: f64) -> Result<()>;

    fn remove(&mut self, id: &str) -> Result<()>;

    fn set_speaker_notes(&mut self, slide_id: &str, text: &str) -> Result<()>;
}

/// Replays `intents` on `slide_id`. A failing intent is logged and skipped;
/// returns how many failed.
pub fn apply_intents<S>(surface: &mut S, slide_id: &str, intents: &[Intent]) -> usize
where
    S: PresentationSurface + ?Sized,
{
    let mut failures = 0;
    for intent in intents {
        let outcome = match intent {
            Intent::CreateShape { id, shape, rect } => surface.insert_shape(slide_id, id, *shape, *rect),
            Intent::StyleShape { id, style } => surface.set_shape_style(id, style),
            Intent::CreateLine { id, from, to } => surface.insert_line(slide_id, id, *from, *to),
            Intent::StyleLine { id, style } => surface.set_line_style(id, style),
            Intent::CreateTable {
                id,
                rows,
                columns,
                rect,
            } => surface.insert_table(slide_id, id, *rows, *columns, *rect),
            Intent::CreateImage { id, url, rect } => surface.insert_image(slide_id, id, url, *rect),
            Intent::InsertText { target, text } => surface.set_text(target, text),
            Intent::StyleText {
                target,
                span,
                style,
            } => surface.set_text_style(target, *span, style),
            Intent::AlignParagraphs { target, alignment } => {
                surface.set_paragraph_alignment(target, *alignment)
            }
            Intent::FillCell {
                table_id,
                row,
                column,
                color,
            } => surface.set_cell_fill(table_id, *row, *column, color),
            Intent::Group { id, children } => surface.group(id, children),
            Intent::Translate { id, dx, dy } => surface.translate(id, *dx, *dy),
            Intent::Remove { id } => surface.remove(id),
            Intent::SpeakerNotes { text } => surface.set_speaker_notes(slide_id, text),
        };
        if let Err(e) = outcome {
            warn!(
                "[apply_intents] slide '{slide_id}': skipping {} ({e})",
                intent.name()
            );
            failures += 1;
        }
    }
    debug!(
        "[apply_intents] slide '{slide_id}': {} intents, {failures} failed",
        intents.len()
    );
    failures
}

/// Placeholder regions of a fetched slide, converted from EMU transforms to points.
pub fn placeholders_of(page: &Page) -> Vec<PlaceholderRegion> {
    let Some(elements) = page.page_elements.as_ref() else {
        return Vec::new();
    };
    elements
        .iter()
        .filter_map(|element| {
            let kind = element
                .shape
                .as_ref()?
                .placeholder
                .as_ref()?
                .placeholder_type?;
            let size = element.size.as_ref();
            let (scale_x, scale_y, left, top) = match element.transform.as_ref() {
                Some(t) => {
                    let (x, y) = t.translation_in_pt();
                    (t.scale_x.unwrap_or(1.0), t.scale_y.unwrap_or(1.0), x, y)
                }
                None => (1.0, 1.0, 0.0, 0.0),
            };
            let width = dimension_to_pt(size.and_then(|s| s.width.as_ref())) * scale_x;
            let height = dimension_to_pt(size.and_then(|s| s.height.as_ref())) * scale_y;
            Some(PlaceholderRegion {
                object_id: element.object_id.clone(),
                kind,
                rect: Rect::new(left, top, width.abs(), height.abs()),
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Records every call as a string and rejects operations on unknown ids.
    #[derive(Default)]
    pub struct FakeSurface {
        pub calls: Vec<String>,
        pub known: Vec<String>,
        pub placeholders: Vec<PlaceholderRegion>,
        next_slide: usize,
    }

    impl FakeSurface {
        fn known(&self, id: &str) -> Result<()> {
            if self.known.iter().any(|k| k == id) {
                Ok(())
            } else {
                Err(SurfaceError::UnknownObject(id.to_string()))
            }
        }

        fn created(&mut self, call: String, id: &str) -> Result<()> {
            self.calls.push(call);
            self.known.push(id.to_string());
            Ok(())
        }
    }

    impl PresentationSurface for FakeSurface {
        fn append_slide(&mut self, layout: PredefinedLayout) -> Result<String> {
            self.next_slide += 1;
            let id = format!("slide_{}", self.next_slide);
            self.created(format!("slide {id} {layout:?}"), &id)?;
            Ok(id)
        }

        fn placeholders(&self, _slide_id: &str) -> Vec<PlaceholderRegion> {
            self.placeholders.clone()
        }

        fn insert_shape(&mut self, _slide: &str, id: &str, shape: ShapeType, _rect: Rect) -> Result<()> {
            self.created(format!("shape {id} {shape:?}"), id)
        }

        fn insert_line(&mut self, _slide: &str, id: &str, _from: Point, _to: Point) -> Result<()> {
            self.created(format!("line {id}"), id)
        }

        fn insert_table(&mut self, _slide: &str, id: &str, rows: usize, columns: usize, _rect: Rect) -> Result<()> {
            self.created(format!("table {id} {rows}x{columns}"), id)
        }

        fn insert_image(&mut self, _slide: &str, id: &str, url: &str, _rect: Rect) -> Result<()> {
            self.created(format!("image {id} {url}"), id)
        }

        fn set_shape_style(&mut self, id: &str, _style: &ShapeStyle) -> Result<()> {
            self.known(id)?;
            self.calls.push(format!("style {id}"));
            Ok(())
        }

        fn set_line_style(&mut self, id: &str, _style: &LineStyle) -> Result<()> {
            self.known(id)?;
            self.calls.push(format!("line-style {id}"));
            Ok(())
        }

        fn set_text(&mut self, target: &TextTarget, text: &str) -> Result<()> {
            self.known(target.object_id())?;
            self.calls.push(format!("text {} {text}", target.object_id()));
            Ok(())
        }

        fn set_text_style(&mut self, target: &TextTarget, _span: Option<TextSpan>, _style: &TextStyleSpec) -> Result<()> {
            self.known(target.object_id())
        }

        fn set_paragraph_alignment(&mut self, target: &TextTarget, _alignment: Alignment) -> Result<()> {
            self.known(target.object_id())
        }

        fn set_cell_fill(&mut self, table_id: &str, _row: usize, _column: usize, _color: &str) -> Result<()> {
            self.known(table_id)
        }

        fn group(&mut self, group_id: &str, children: &[String]) -> Result<()> {
            for child in children {
                self.known(child)?;
            }
            self.created(format!("group {group_id} {}", children.len()), group_id)
        }

        fn translate(&mut self, id: &str, dx: f64, dy: f64) -> Result<()> {
            self.known(id)?;
            self.calls.push(format!("translate {id} {dx:.1} {dy:.1}"));
            Ok(())
        }

        fn remove(&mut self, id: &str) -> Result<()> {
            self.known(id)?;
            self.calls.push(format!("remove {id}"));
            Ok(())
        }

        fn set_speaker_notes(&mut self, slide_id: &str, text: &str) -> Result<()> {
            self.calls.push(format!("notes {slide_id} {text}"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FakeSurface;
    use super::*;
    use crate::canvas::{Canvas, IdGenerator, TextOptions};

    #[test]
    fn failing_intents_are_skipped_not_fatal() {
        let mut ids = IdGenerator::new("t");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#000000");
        let box_id = canvas.text_box(Rect::new(0.0, 0.0, 10.0, 10.0), "hi", &TextOptions::new(10.0, "#000000"));
        canvas.translate("missing_1", 5.0, 5.0);
        canvas.remove(&box_id);
        let intents = canvas.into_intents();

        let mut surface = FakeSurface::default();
        let slide = surface.append_slide(PredefinedLayout::Blank).unwrap();
        let failures = apply_intents(&mut surface, &slide, &intents);
        assert_eq!(failures, 1);
        assert!(surface.calls.iter().any(|c| c == &format!("text {box_id} hi")));
        assert_eq!(surface.calls.last().unwrap(), &format!("remove {box_id}"));
    }

    #[test]
    fn placeholders_convert_emu_geometry() {
        let page: Page = serde_json::from_value(serde_json::json!({
            "objectId": "p1",
            "pageElements": [
                {
                    "objectId": "body_1",
                    "size": {"width": {"magnitude": 3000000, "unit": "EMU"}, "height": {"magnitude": 1270000, "unit": "EMU"}},
                    "transform": {"scaleX": 2.0, "scaleY": 1.0, "translateX": 127000, "translateY": 254000, "unit": "EMU"},
                    "shape": {"shapeType": "TEXT_BOX", "placeholder": {"type": "BODY", "index": 1}}
                },
                {
                    "objectId": "plain",
                    "shape": {"shapeType": "RECTANGLE"}
                }
            ]
        }))
        .unwrap();
        let regions = placeholders_of(&page);
        assert_eq!(regions.len(), 1);
        let body = &regions[0];
        assert_eq!(body.kind, PlaceholderType::Body);
        assert!((body.rect.left - 10.0).abs() < 1e-6);
        assert!((body.rect.top - 20.0).abs() < 1e-6);
        assert!((body.rect.width - 2.0 * 3000000.0 / 12700.0).abs() < 1e-6);
        assert!((body.rect.height - 100.0).abs() < 1e-6);
    }
}
