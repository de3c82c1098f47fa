//! Backend-neutral drawing intents.
//!
//! Renderers and slide generators never talk to a presentation service. They push
//! [`Intent`]s through a [`Canvas`], and [`crate::surface::apply_intents`] replays
//! the list against whichever [`crate::surface::PresentationSurface`] is active.

use log::warn;

use crate::layout::{Point, Rect};
use crate::models::line::ArrowStyle;
use crate::models::properties::Alignment;
use crate::models::shape::ShapeType;
use crate::models::shape_properties::{ContentAlignment, DashStyle};
use crate::text::{parse_markup, StyledText};

/// Generates Slides-compatible object ids (`prefix_NNN`).
///
/// Ids must be 5 to 50 characters, start with a word character and continue with
/// word characters, `-` or `:`.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

const MAX_PREFIX_LEN: usize = 40;

impl IdGenerator {
    pub fn new(prefix: &str) -> Self {
        let mut clean: String = prefix
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':'))
            .take(MAX_PREFIX_LEN)
            .collect();
        if !clean.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            clean.insert(0, 'g');
        }
        IdGenerator {
            prefix: clean,
            next: 1,
        }
    }

    /// A prefix drawn from the OS random source, so ids from separate runs
    /// against the same presentation do not collide.
    pub fn random() -> Self {
        let mut buf = [0u8; 4];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => {
                let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
                Self::new(&format!("g{hex}"))
            }
            Err(e) => {
                warn!("[IdGenerator::random] no random source ({e}), using a fixed prefix");
                Self::new("gen")
            }
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}_{:03}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("obj")
    }
}

/// Where text goes: a shape (text box, placeholder) or one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum TextTarget {
    Shape(String),
    Cell {
        table_id: String,
        row: usize,
        column: usize,
    },
}

impl TextTarget {
    pub fn object_id(&self) -> &str {
        match self {
            TextTarget::Shape(id) => id,
            TextTarget::Cell { table_id, .. } => table_id,
        }
    }
}

/// A text range in UTF-16 code units. `None` on an intent means the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

/// Character style; only the fields that are `Some` are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyleSpec {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl TextStyleSpec {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.font_size.is_none()
            && self.color.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Border {
    Hidden,
    Solid { color: String, weight: f64 },
}

/// Shape fill, outline and vertical text alignment; `None` leaves the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<String>,
    pub border: Option<Border>,
    pub content_alignment: Option<ContentAlignment>,
}

impl ShapeStyle {
    /// Solid fill, no outline.
    pub fn filled(color: &str) -> Self {
        ShapeStyle {
            fill: Some(color.to_string()),
            border: Some(Border::Hidden),
            content_alignment: None,
        }
    }

    /// Solid fill with a thin outline.
    pub fn outlined(fill: &str, border: &str, weight: f64) -> Self {
        ShapeStyle {
            fill: Some(fill.to_string()),
            border: Some(Border::Solid {
                color: border.to_string(),
                weight,
            }),
            content_alignment: None,
        }
    }

    /// Outline only, transparent inside.
    pub fn ring(border: &str, weight: f64) -> Self {
        ShapeStyle {
            fill: None,
            border: Some(Border::Solid {
                color: border.to_string(),
                weight,
            }),
            content_alignment: None,
        }
    }

    pub fn valign(mut self, alignment: ContentAlignment) -> Self {
        self.content_alignment = Some(alignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.border.is_none() && self.content_alignment.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: f64,
    pub dash: DashStyle,
    pub start_arrow: ArrowStyle,
    pub end_arrow: ArrowStyle,
}

impl LineStyle {
    pub fn solid(color: &str, weight: f64) -> Self {
        LineStyle {
            color: color.to_string(),
            weight,
            dash: DashStyle::Solid,
            start_arrow: ArrowStyle::None,
            end_arrow: ArrowStyle::None,
        }
    }

    pub fn arrow(color: &str, weight: f64) -> Self {
        LineStyle {
            end_arrow: ArrowStyle::FillArrow,
            ..Self::solid(color, weight)
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dash = DashStyle::Dash;
        self
    }
}

/// One drawing operation in absolute page points.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CreateShape {
        id: String,
        shape: ShapeType,
        rect: Rect,
    },
    StyleShape {
        id: String,
        style: ShapeStyle,
    },
    CreateLine {
        id: String,
        from: Point,
        to: Point,
    },
    StyleLine {
        id: String,
        style: LineStyle,
    },
    CreateTable {
        id: String,
        rows: usize,
        columns: usize,
        rect: Rect,
    },
    CreateImage {
        id: String,
        url: String,
        rect: Rect,
    },
    InsertText {
        target: TextTarget,
        text: String,
    },
    StyleText {
        target: TextTarget,
        span: Option<TextSpan>,
        style: TextStyleSpec,
    },
    AlignParagraphs {
        target: TextTarget,
        alignment: Alignment,
    },
    FillCell {
        table_id: String,
        row: usize,
        column: usize,
        color: String,
    },
    Group {
        id: String,
        children: Vec<String>,
    },
    Translate {
        id: String,
        dx: f64,
        dy: f64,
    },
    Remove {
        id: String,
    },
    SpeakerNotes {
        text: String,
    },
}

impl Intent {
    /// The element this intent creates, with its footprint.
    pub fn created(&self) -> Option<(&str, Rect)> {
        match self {
            Intent::CreateShape { id, rect, .. }
            | Intent::CreateTable { id, rect, .. }
            | Intent::CreateImage { id, rect, .. } => Some((id, *rect)),
            Intent::CreateLine { id, from, to } => Some((id, Rect::from_points(*from, *to))),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::CreateShape { .. } => "createShape",
            Intent::StyleShape { .. } => "styleShape",
            Intent::CreateLine { .. } => "createLine",
            Intent::StyleLine { .. } => "styleLine",
            Intent::CreateTable { .. } => "createTable",
            Intent::CreateImage { .. } => "createImage",
            Intent::InsertText { .. } => "insertText",
            Intent::StyleText { .. } => "styleText",
            Intent::AlignParagraphs { .. } => "alignParagraphs",
            Intent::FillCell { .. } => "fillCell",
            Intent::Group { .. } => "group",
            Intent::Translate { .. } => "translate",
            Intent::Remove { .. } => "remove",
            Intent::SpeakerNotes { .. } => "speakerNotes",
        }
    }
}

/// Smallest rectangle covering every element created by `intents`.
pub fn bounding_box(intents: &[Intent]) -> Option<Rect> {
    intents
        .iter()
        .filter_map(Intent::created)
        .map(|(_, rect)| rect)
        .reduce(|acc, rect| acc.union(&rect))
}

/// How a run of text should look before markup is applied on top.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub size: f64,
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub align: Alignment,
    pub valign: ContentAlignment,
}

impl TextOptions {
    pub fn new(size: f64, color: &str) -> Self {
        TextOptions {
            size,
            color: color.to_string(),
            bold: false,
            italic: false,
            align: Alignment::Start,
            valign: ContentAlignment::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn center(self) -> Self {
        self.align(Alignment::Center)
    }

    pub fn valign(mut self, valign: ContentAlignment) -> Self {
        self.valign = valign;
        self
    }
}

/// Collects intents for one slide and hands out object ids.
pub struct Canvas<'a> {
    ids: &'a mut IdGenerator,
    intents: Vec<Intent>,
    font_family: String,
    highlight_color: String,
}

impl<'a> Canvas<'a> {
    pub fn new(ids: &'a mut IdGenerator, font_family: &str, highlight_color: &str) -> Self {
        Canvas {
            ids,
            intents: Vec::new(),
            font_family: font_family.to_string(),
            highlight_color: highlight_color.to_string(),
        }
    }

    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn into_intents(self) -> Vec<Intent> {
        self.intents
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Position to pass to [`Canvas::created_since`] later.
    pub fn mark(&self) -> usize {
        self.intents.len()
    }

    /// Elements created after `mark`, as `(id, footprint, groupable)`.
    /// Tables cannot be members of a group.
    pub fn created_since(&self, mark: usize) -> Vec<(String, Rect, bool)> {
        self.intents
            .get(mark..)
            .unwrap_or_default()
            .iter()
            .filter_map(|intent| {
                let groupable = !matches!(intent, Intent::CreateTable { .. });
                intent
                    .created()
                    .map(|(id, rect)| (id.to_string(), rect, groupable))
            })
            .collect()
    }

    pub fn shape(&mut self, shape: ShapeType, rect: Rect, style: ShapeStyle) -> String {
        let id = self.next_id();
        self.push(Intent::CreateShape {
            id: id.clone(),
            shape,
            rect,
        });
        if !style.is_empty() {
            self.push(Intent::StyleShape {
                id: id.clone(),
                style,
            });
        }
        id
    }

    pub fn rect(&mut self, rect: Rect, fill: &str) -> String {
        self.shape(ShapeType::Rectangle, rect, ShapeStyle::filled(fill))
    }

    /// A shape carrying centered text.
    pub fn labeled_shape(
        &mut self,
        shape: ShapeType,
        rect: Rect,
        style: ShapeStyle,
        text: &str,
        options: &TextOptions,
    ) -> String {
        let style = style.valign(options.valign);
        let id = self.shape(shape, rect, style);
        self.set_text(TextTarget::Shape(id.clone()), text, options);
        id
    }

    pub fn line(&mut self, from: Point, to: Point, style: LineStyle) -> String {
        let id = self.next_id();
        self.push(Intent::CreateLine {
            id: id.clone(),
            from,
            to,
        });
        self.push(Intent::StyleLine {
            id: id.clone(),
            style,
        });
        id
    }

    /// A borderless text box.
    pub fn text_box(&mut self, rect: Rect, text: &str, options: &TextOptions) -> String {
        let style = ShapeStyle {
            fill: None,
            border: None,
            content_alignment: Some(options.valign),
        };
        let id = self.shape(ShapeType::TextBox, rect, style);
        self.set_text(TextTarget::Shape(id.clone()), text, options);
        id
    }

    /// Inserts marked-up text and styles it. Empty text is skipped since the
    /// Slides API rejects empty inserts.
    pub fn set_text(&mut self, target: TextTarget, text: &str, options: &TextOptions) {
        let styled = parse_markup(text);
        self.set_styled_text(target, &styled, options);
    }

    pub fn set_styled_text(&mut self, target: TextTarget, styled: &StyledText, options: &TextOptions) {
        if styled.is_empty() {
            return;
        }
        self.push(Intent::InsertText {
            target: target.clone(),
            text: styled.text.clone(),
        });
        self.push(Intent::StyleText {
            target: target.clone(),
            span: None,
            style: TextStyleSpec {
                font_family: Some(self.font_family.clone()),
                font_size: Some(options.size),
                color: Some(options.color.clone()),
                bold: Some(options.bold),
                italic: options.italic.then_some(true),
            },
        });
        for span in &styled.spans {
            let style = TextStyleSpec {
                bold: Some(span.bold || span.highlight || options.bold),
                color: span.highlight.then(|| self.highlight_color.clone()),
                ..TextStyleSpec::default()
            };
            self.push(Intent::StyleText {
                target: target.clone(),
                span: Some(TextSpan {
                    start: span.start,
                    end: span.end,
                }),
                style,
            });
        }
        if options.align != Alignment::Start {
            self.push(Intent::AlignParagraphs {
                target,
                alignment: options.align,
            });
        }
    }

    pub fn table(&mut self, rows: usize, columns: usize, rect: Rect) -> String {
        let id = self.next_id();
        self.push(Intent::CreateTable {
            id: id.clone(),
            rows,
            columns,
            rect,
        });
        id
    }

    pub fn fill_cell(&mut self, table_id: &str, row: usize, column: usize, color: &str) {
        self.push(Intent::FillCell {
            table_id: table_id.to_string(),
            row,
            column,
            color: color.to_string(),
        });
    }

    pub fn image(&mut self, url: &str, rect: Rect) -> String {
        let id = self.next_id();
        self.push(Intent::CreateImage {
            id: id.clone(),
            url: url.to_string(),
            rect,
        });
        id
    }

    /// Groups `children`; fewer than two children is not a group.
    pub fn group(&mut self, children: Vec<String>) -> Option<String> {
        if children.len() < 2 {
            return None;
        }
        let id = self.next_id();
        self.push(Intent::Group {
            id: id.clone(),
            children,
        });
        Some(id)
    }

    pub fn translate(&mut self, id: &str, dx: f64, dy: f64) {
        if dx.abs() < 0.01 && dy.abs() < 0.01 {
            return;
        }
        self.push(Intent::Translate {
            id: id.to_string(),
            dx,
            dy,
        });
    }

    pub fn remove(&mut self, id: &str) {
        self.push(Intent::Remove { id: id.to_string() });
    }

    pub fn speaker_notes(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.push(Intent::SpeakerNotes {
                text: text.to_string(),
            });
        }
    }
}
