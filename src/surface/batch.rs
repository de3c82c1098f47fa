use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::{apply_intents, PlaceholderRegion, PresentationSurface, Result, SurfaceError};
use crate::canvas::{Border, IdGenerator, LineStyle, ShapeStyle, TextSpan, TextStyleSpec, TextTarget};
use crate::layout::{Point, Rect};
use crate::models::colors::{OpaqueColor, OptionalColor};
use crate::models::common::{AffineTransform, Dimension, Size};
use crate::models::line::{LineCategory, LineFill, LineProperties};
use crate::models::properties::{Alignment, ParagraphStyle, TextStyle};
use crate::models::requests::{
    ApplyMode, BatchUpdateRequest, CreateImageRequest, CreateLineRequest, CreateShapeRequest,
    CreateSlideRequest, CreateTableRequest, DeleteObjectRequest, GroupObjectsRequest,
    InsertTextRequest, LayoutReference, PageElementProperties, PredefinedLayout, Request,
    TextRange, UpdateLinePropertiesRequest, UpdatePageElementTransformRequest,
    UpdateParagraphStyleRequest, UpdateShapePropertiesRequest, UpdateTableCellPropertiesRequest,
    UpdateTextStyleRequest,
};
use crate::models::shape::ShapeType;
use crate::models::shape_properties::{
    Outline, OutlineFill, PropertyState, ShapeBackgroundFill, ShapeProperties, SolidFill,
};
use crate::models::table_properties::{
    TableCellBackgroundFill, TableCellLocation, TableCellProperties, TableRange,
};
use crate::slides::SlidePlan;

/// A surface that draws nothing and instead records `batchUpdate` requests.
///
/// Geometry is written as `{magnitude, unit: "PT"}`, positions as a scale-1 PT
/// transform, and every `fields` mask names exactly the properties being set.
#[derive(Debug, Default)]
pub struct BatchRecorder {
    requests: Vec<Request>,
    ids: IdGenerator,
    known: HashSet<String>,
    reversed_lines: HashSet<String>,
    notes_shapes: HashMap<String, String>,
}

fn element_properties(slide_id: &str, rect: Rect) -> PageElementProperties {
    PageElementProperties {
        page_object_id: slide_id.to_string(),
        size: Some(Size::pt(rect.width, rect.height)),
        transform: Some(AffineTransform::translation_pt(rect.left, rect.top)),
    }
}

fn cell_location(target: &TextTarget) -> Option<TableCellLocation> {
    match target {
        TextTarget::Shape(_) => None,
        TextTarget::Cell { row, column, .. } => Some(TableCellLocation {
            row_index: *row as i32,
            column_index: *column as i32,
        }),
    }
}

fn text_range(span: Option<TextSpan>) -> TextRange {
    match span {
        Some(span) => TextRange::fixed(span.start as i32, span.end as i32),
        None => TextRange::all(),
    }
}

fn solid_fill(hex: &str) -> Option<SolidFill> {
    let color = OpaqueColor::from_hex(hex);
    if color.is_none() {
        warn!("[BatchRecorder] ignoring malformed color '{hex}'");
    }
    color.map(|color| SolidFill {
        color: Some(color),
        alpha: None,
    })
}

impl BatchRecorder {
    pub fn new(ids: IdGenerator) -> Self {
        BatchRecorder {
            ids,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }

    pub fn to_batch_update(&self) -> BatchUpdateRequest {
        BatchUpdateRequest {
            requests: self.requests.clone(),
        }
    }

    /// Requests as a pretty-printed JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.requests)
    }

    /// Makes an id that already exists in the presentation addressable,
    /// e.g. a placeholder of a slide created elsewhere.
    pub fn register_object(&mut self, object_id: &str) {
        self.known.insert(object_id.to_string());
    }

    /// Speaker notes live in a shape the API creates with the slide, so a batch can
    /// only write them once that shape's id is known.
    pub fn set_notes_object_id(&mut self, slide_id: &str, notes_shape_id: &str) {
        self.register_object(notes_shape_id);
        self.notes_shapes
            .insert(slide_id.to_string(), notes_shape_id.to_string());
    }

    /// Records `createSlide` with a caller-chosen id, appended after existing slides.
    pub fn add_slide(&mut self, slide_id: &str, layout: PredefinedLayout) {
        self.requests.push(Request::CreateSlide(CreateSlideRequest {
            object_id: Some(slide_id.to_string()),
            insertion_index: None,
            slide_layout_reference: Some(LayoutReference {
                predefined_layout: Some(layout),
                layout_id: None,
            }),
        }));
        self.known.insert(slide_id.to_string());
    }

    /// Records a planned slide; returns how many of its intents were rejected.
    pub fn record_plan(&mut self, plan: &SlidePlan) -> usize {
        self.add_slide(&plan.slide_id, plan.layout);
        apply_intents(self, &plan.slide_id, &plan.intents)
    }

    fn require(&self, id: &str) -> Result<()> {
        if self.known.contains(id) {
            Ok(())
        } else {
            Err(SurfaceError::UnknownObject(id.to_string()))
        }
    }

    fn create(&mut self, slide_id: &str, id: &str, request: Request) -> Result<()> {
        self.require(slide_id)?;
        if !self.known.insert(id.to_string()) {
            return Err(SurfaceError::Rejected {
                operation: request.name(),
                reason: format!("object id '{id}' already exists"),
            });
        }
        self.requests.push(request);
        Ok(())
    }
}

impl PresentationSurface for BatchRecorder {
    fn append_slide(&mut self, layout: PredefinedLayout) -> Result<String> {
        let id = self.ids.next_id();
        self.add_slide(&id, layout);
        Ok(id)
    }

    fn placeholders(&self, _slide_id: &str) -> Vec<PlaceholderRegion> {
        Vec::new()
    }

    fn insert_shape(&mut self, slide_id: &str, id: &str, shape: ShapeType, rect: Rect) -> Result<()> {
        let request = Request::CreateShape(CreateShapeRequest {
            object_id: id.to_string(),
            shape_type: shape,
            element_properties: element_properties(slide_id, rect),
        });
        self.create(slide_id, id, request)
    }

    /// A line runs from the top-left to the bottom-right of its box, so endpoints
    /// are swapped when needed (and arrowheads with them in `set_line_style`).
    fn insert_line(&mut self, slide_id: &str, id: &str, from: Point, to: Point) -> Result<()> {
        let reversed = to.x < from.x || (to.x == from.x && to.y < from.y);
        let (start, end) = if reversed { (to, from) } else { (from, to) };
        if end.y < start.y {
            warn!("[BatchRecorder::insert_line] '{id}' rises to the right; drawn on the falling diagonal");
        }
        let request = Request::CreateLine(CreateLineRequest {
            object_id: id.to_string(),
            line_category: LineCategory::Straight,
            element_properties: element_properties(slide_id, Rect::from_points(start, end)),
        });
        self.create(slide_id, id, request)?;
        if reversed {
            self.reversed_lines.insert(id.to_string());
        }
        Ok(())
    }

    fn insert_table(
        &mut self,
        slide_id: &str,
        id: &str,
        rows: usize,
        columns: usize,
        rect: Rect,
    ) -> Result<()> {
        if rows == 0 || columns == 0 {
            return Err(SurfaceError::Rejected {
                operation: "createTable",
                reason: format!("{rows}x{columns} table"),
            });
        }
        let request = Request::CreateTable(CreateTableRequest {
            object_id: id.to_string(),
            element_properties: element_properties(slide_id, rect),
            rows: rows as i32,
            columns: columns as i32,
        });
        self.create(slide_id, id, request)
    }

    fn insert_image(&mut self, slide_id: &str, id: &str, url: &str, rect: Rect) -> Result<()> {
        let request = Request::CreateImage(CreateImageRequest {
            object_id: id.to_string(),
            url: url.to_string(),
            element_properties: element_properties(slide_id, rect),
        });
        self.create(slide_id, id, request)
    }

    fn set_shape_style(&mut self, id: &str, style: &ShapeStyle) -> Result<()> {
        self.require(id)?;
        let mut properties = ShapeProperties::default();
        let mut fields = Vec::new();
        if let Some(fill) = style.fill.as_deref().and_then(solid_fill) {
            properties.shape_background_fill = Some(ShapeBackgroundFill {
                property_state: None,
                solid_fill: Some(fill),
            });
            fields.push("shapeBackgroundFill.solidFill.color");
        }
        match &style.border {
            Some(Border::Hidden) => {
                properties.outline = Some(Outline {
                    property_state: Some(PropertyState::NotRendered),
                    ..Outline::default()
                });
                fields.push("outline.propertyState");
            }
            Some(Border::Solid { color, weight }) => {
                if let Some(fill) = solid_fill(color) {
                    properties.outline = Some(Outline {
                        outline_fill: Some(OutlineFill {
                            solid_fill: Some(fill),
                        }),
                        weight: Some(Dimension::pt(*weight)),
                        dash_style: None,
                        property_state: Some(PropertyState::Rendered),
                    });
                    fields.extend(["outline.outlineFill.solidFill.color", "outline.weight", "outline.propertyState"]);
                }
            }
            None => {}
        }
        if let Some(alignment) = style.content_alignment {
            properties.content_alignment = Some(alignment);
            fields.push("contentAlignment");
        }
        if fields.is_empty() {
            debug!("[BatchRecorder::set_shape_style] nothing to update on '{id}'");
            return Ok(());
        }
        self.requests
            .push(Request::UpdateShapeProperties(UpdateShapePropertiesRequest {
                object_id: id.to_string(),
                shape_properties: properties,
                fields: fields.join(","),
            }));
        Ok(())
    }

    fn set_line_style(&mut self, id: &str, style: &LineStyle) -> Result<()> {
        self.require(id)?;
        let (start_arrow, end_arrow) = if self.reversed_lines.contains(id) {
            (style.end_arrow, style.start_arrow)
        } else {
            (style.start_arrow, style.end_arrow)
        };
        let mut fields = vec!["weight", "dashStyle", "startArrow", "endArrow"];
        let line_fill = solid_fill(&style.color).map(|fill| {
            fields.insert(0, "lineFill.solidFill.color");
            LineFill {
                solid_fill: Some(fill),
            }
        });
        self.requests
            .push(Request::UpdateLineProperties(UpdateLinePropertiesRequest {
                object_id: id.to_string(),
                line_properties: LineProperties {
                    line_fill,
                    weight: Some(Dimension::pt(style.weight)),
                    dash_style: Some(style.dash),
                    start_arrow: Some(start_arrow),
                    end_arrow: Some(end_arrow),
                },
                fields: fields.join(","),
            }));
        Ok(())
    }

    fn set_text(&mut self, target: &TextTarget, text: &str) -> Result<()> {
        self.require(target.object_id())?;
        if text.is_empty() {
            return Ok(());
        }
        self.requests.push(Request::InsertText(InsertTextRequest {
            object_id: target.object_id().to_string(),
            cell_location: cell_location(target),
            text: text.to_string(),
            insertion_index: 0,
        }));
        Ok(())
    }

    fn set_text_style(
        &mut self,
        target: &TextTarget,
        span: Option<TextSpan>,
        spec: &TextStyleSpec,
    ) -> Result<()> {
        self.require(target.object_id())?;
        let mut style = TextStyle::default();
        let mut fields = Vec::new();
        if let Some(color) = &spec.color {
            let color = OptionalColor::from_hex(color);
            if color.opaque_color.is_some() {
                style.foreground_color = Some(color);
                fields.push("foregroundColor");
            }
        }
        if let Some(family) = &spec.font_family {
            style.font_family = Some(family.clone());
            fields.push("fontFamily");
        }
        if let Some(size) = spec.font_size {
            style.font_size = Some(Dimension::pt(size));
            fields.push("fontSize");
        }
        if let Some(bold) = spec.bold {
            style.bold = Some(bold);
            fields.push("bold");
        }
        if let Some(italic) = spec.italic {
            style.italic = Some(italic);
            fields.push("italic");
        }
        if fields.is_empty() {
            return Ok(());
        }
        self.requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: target.object_id().to_string(),
            cell_location: cell_location(target),
            style,
            text_range: text_range(span),
            fields: fields.join(","),
        }));
        Ok(())
    }

    fn set_paragraph_alignment(&mut self, target: &TextTarget, alignment: Alignment) -> Result<()> {
        self.require(target.object_id())?;
        self.requests
            .push(Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
                object_id: target.object_id().to_string(),
                cell_location: cell_location(target),
                style: ParagraphStyle {
                    alignment: Some(alignment),
                    line_spacing: None,
                },
                text_range: TextRange::all(),
                fields: "alignment".to_string(),
            }));
        Ok(())
    }

    fn set_cell_fill(&mut self, table_id: &str, row: usize, column: usize, color: &str) -> Result<()> {
        self.require(table_id)?;
        let Some(fill) = solid_fill(color) else {
            return Err(SurfaceError::Rejected {
                operation: "updateTableCellProperties",
                reason: format!("malformed color '{color}'"),
            });
        };
        self.requests
            .push(Request::UpdateTableCellProperties(UpdateTableCellPropertiesRequest {
                object_id: table_id.to_string(),
                table_range: TableRange::single_cell(row as i32, column as i32),
                table_cell_properties: TableCellProperties {
                    table_cell_background_fill: Some(TableCellBackgroundFill {
                        property_state: None,
                        solid_fill: Some(fill),
                    }),
                    content_alignment: None,
                },
                fields: "tableCellBackgroundFill.solidFill.color".to_string(),
            }));
        Ok(())
    }

    fn group(&mut self, group_id: &str, children: &[String]) -> Result<()> {
        if children.len() < 2 {
            return Err(SurfaceError::Rejected {
                operation: "groupObjects",
                reason: "a group needs at least two children".to_string(),
            });
        }
        for child in children {
            self.require(child)?;
        }
        if !self.known.insert(group_id.to_string()) {
            return Err(SurfaceError::Rejected {
                operation: "groupObjects",
                reason: format!("object id '{group_id}' already exists"),
            });
        }
        self.requests.push(Request::GroupObjects(GroupObjectsRequest {
            group_object_id: Some(group_id.to_string()),
            children_object_ids: children.to_vec(),
        }));
        Ok(())
    }

    fn translate(&mut self, id: &str, dx: f64, dy: f64) -> Result<()> {
        self.require(id)?;
        self.requests
            .push(Request::UpdatePageElementTransform(UpdatePageElementTransformRequest {
                object_id: id.to_string(),
                transform: AffineTransform::translation_pt(dx, dy),
                apply_mode: ApplyMode::Relative,
            }));
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        self.require(id)?;
        self.known.remove(id);
        self.requests.push(Request::DeleteObject(DeleteObjectRequest {
            object_id: id.to_string(),
        }));
        Ok(())
    }

    fn set_speaker_notes(&mut self, slide_id: &str, text: &str) -> Result<()> {
        let Some(notes_id) = self.notes_shapes.get(slide_id).cloned() else {
            warn!("[BatchRecorder::set_speaker_notes] no notes shape registered for '{slide_id}', skipping");
            return Ok(());
        };
        self.set_text(&TextTarget::Shape(notes_id), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, Intent};
    use serde_json::json;

    fn recorder_with_slide() -> BatchRecorder {
        let mut recorder = BatchRecorder::new(IdGenerator::new("b"));
        recorder.add_slide("s1", PredefinedLayout::Blank);
        recorder
    }

    #[test]
    fn shapes_use_points_and_scale_one_transforms() {
        let mut recorder = recorder_with_slide();
        recorder
            .insert_shape("s1", "box_1", ShapeType::Rectangle, Rect::new(10.0, 20.0, 30.0, 40.0))
            .unwrap();
        let value = serde_json::to_value(&recorder.requests()[1]).unwrap();
        assert_eq!(
            value,
            json!({"createShape": {
                "objectId": "box_1",
                "shapeType": "RECTANGLE",
                "elementProperties": {
                    "pageObjectId": "s1",
                    "size": {
                        "width": {"magnitude": 30.0, "unit": "PT"},
                        "height": {"magnitude": 40.0, "unit": "PT"}
                    },
                    "transform": {"scaleX": 1.0, "scaleY": 1.0, "translateX": 10.0, "translateY": 20.0, "unit": "PT"}
                }
            }})
        );
    }

    #[test]
    fn field_masks_list_only_set_fields() {
        let mut recorder = recorder_with_slide();
        recorder
            .insert_shape("s1", "box_1", ShapeType::TextBox, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        recorder
            .set_text_style(
                &TextTarget::Shape("box_1".into()),
                Some(TextSpan { start: 2, end: 5 }),
                &TextStyleSpec {
                    bold: Some(true),
                    color: Some("#ff0000".into()),
                    ..TextStyleSpec::default()
                },
            )
            .unwrap();
        recorder.set_shape_style("box_1", &ShapeStyle::filled("#00ff00")).unwrap();
        match &recorder.requests()[2] {
            Request::UpdateTextStyle(r) => {
                assert_eq!(r.fields, "foregroundColor,bold");
                assert_eq!(r.text_range, TextRange::fixed(2, 5));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &recorder.requests()[3] {
            Request::UpdateShapeProperties(r) => {
                assert_eq!(r.fields, "shapeBackgroundFill.solidFill.color,outline.propertyState")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn leftward_lines_are_flipped_with_their_arrows() {
        let mut recorder = recorder_with_slide();
        recorder
            .insert_line("s1", "l1", Point::new(100.0, 50.0), Point::new(20.0, 50.0))
            .unwrap();
        recorder.set_line_style("l1", &LineStyle::arrow("#000000", 1.0)).unwrap();
        match &recorder.requests()[1] {
            Request::CreateLine(r) => {
                let t = r.element_properties.transform.as_ref().unwrap();
                assert_eq!(t.translate_x, Some(20.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &recorder.requests()[2] {
            Request::UpdateLineProperties(r) => {
                assert_eq!(r.line_properties.start_arrow, Some(crate::models::line::ArrowStyle::FillArrow));
                assert_eq!(r.line_properties.end_arrow, Some(crate::models::line::ArrowStyle::None));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn translate_is_relative() {
        let mut recorder = recorder_with_slide();
        let mut ids = IdGenerator::new("c");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#000000");
        let a = canvas.rect(Rect::new(0.0, 0.0, 5.0, 5.0), "#ffffff");
        let b = canvas.rect(Rect::new(10.0, 0.0, 5.0, 5.0), "#ffffff");
        let group = canvas.group(vec![a, b]).unwrap();
        canvas.translate(&group, 12.5, -3.0);
        let failures = apply_intents(&mut recorder, "s1", &canvas.into_intents());
        assert_eq!(failures, 0);
        let last = serde_json::to_value(recorder.requests().last().unwrap()).unwrap();
        assert_eq!(last["updatePageElementTransform"]["applyMode"], "RELATIVE");
        assert_eq!(last["updatePageElementTransform"]["transform"]["translateX"], 12.5);
    }

    #[test]
    fn notes_need_a_registered_shape() {
        let mut recorder = recorder_with_slide();
        let intents = vec![Intent::SpeakerNotes { text: "say hi".into() }];
        assert_eq!(apply_intents(&mut recorder, "s1", &intents), 0);
        assert_eq!(recorder.requests().len(), 1);

        recorder.set_notes_object_id("s1", "notes_1");
        apply_intents(&mut recorder, "s1", &intents);
        assert!(matches!(recorder.requests().last(), Some(Request::InsertText(r)) if r.object_id == "notes_1"));
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let mut recorder = recorder_with_slide();
        assert!(matches!(
            recorder.translate("ghost", 1.0, 1.0),
            Err(SurfaceError::UnknownObject(_))
        ));
        assert!(recorder
            .insert_shape("no_slide", "x1", ShapeType::Rectangle, Rect::EMPTY)
            .is_err());
    }
}
