//! Diagram renderers and the kind table that selects them.
//!
//! A diagram type arrives as free text (`"statsCompare"`, `"Process flow"`); it is
//! parsed once into a [`DiagramKind`] and every later decision uses the enum.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::canvas::Canvas;
use crate::color::contrast_text_color;
use crate::layout::{LayoutManager, Rect};
use crate::settings::Settings;

pub mod cards;
pub mod compare;
pub mod cycle;
pub mod image_text;
pub mod kpi;
pub mod lanes;
pub mod process;
pub mod progress;
pub mod pyramid;
pub mod table;
pub mod text_blocks;
pub mod timeline;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid content for {kind} diagram: {source}")]
    InvalidContent {
        kind: DiagramKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Work area {0:?} has no room to draw into")]
    EmptyArea(Rect),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// The diagram archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    Cards,
    Timeline,
    Process,
    Cycle,
    Pyramid,
    Triangle,
    StatsCompare,
    BarCompare,
    Comparison,
    StepUp,
    Lanes,
    FlowChart,
    Kpi,
    Table,
    Faq,
    Quote,
    Progress,
    ImageText,
    Agenda,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 19] = [
        DiagramKind::Cards,
        DiagramKind::Timeline,
        DiagramKind::Process,
        DiagramKind::Cycle,
        DiagramKind::Pyramid,
        DiagramKind::Triangle,
        DiagramKind::StatsCompare,
        DiagramKind::BarCompare,
        DiagramKind::Comparison,
        DiagramKind::StepUp,
        DiagramKind::Lanes,
        DiagramKind::FlowChart,
        DiagramKind::Kpi,
        DiagramKind::Table,
        DiagramKind::Faq,
        DiagramKind::Quote,
        DiagramKind::Progress,
        DiagramKind::ImageText,
        DiagramKind::Agenda,
    ];

    /// Case-insensitive keyword match. The checks run in a fixed order because
    /// several keywords overlap (`"barCompare"` contains both `bar` and `compare`,
    /// `"processDiagram"` contains `diagram`).
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.is_empty() {
            return None;
        }
        let has = |needle: &str| s.contains(needle);
        let kind = if has("card") {
            DiagramKind::Cards
        } else if has("timeline") {
            DiagramKind::Timeline
        } else if has("process") {
            DiagramKind::Process
        } else if has("cycle") {
            DiagramKind::Cycle
        } else if has("pyramid") {
            DiagramKind::Pyramid
        } else if has("triangle") {
            DiagramKind::Triangle
        } else if has("compare") || has("comparison") {
            if has("stats") {
                DiagramKind::StatsCompare
            } else if has("bar") {
                DiagramKind::BarCompare
            } else {
                DiagramKind::Comparison
            }
        } else if has("stepup") || has("step_up") || has("step-up") || has("stair") {
            DiagramKind::StepUp
        } else if has("lane") || has("diagram") {
            DiagramKind::Lanes
        } else if has("flow") {
            DiagramKind::FlowChart
        } else if has("kpi") {
            DiagramKind::Kpi
        } else if has("table") {
            DiagramKind::Table
        } else if has("faq") {
            DiagramKind::Faq
        } else if has("quote") {
            DiagramKind::Quote
        } else if has("progress") {
            DiagramKind::Progress
        } else if has("image") {
            DiagramKind::ImageText
        } else if has("agenda") {
            DiagramKind::Agenda
        } else {
            return None;
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Cards => "cards",
            DiagramKind::Timeline => "timeline",
            DiagramKind::Process => "process",
            DiagramKind::Cycle => "cycle",
            DiagramKind::Pyramid => "pyramid",
            DiagramKind::Triangle => "triangle",
            DiagramKind::StatsCompare => "statsCompare",
            DiagramKind::BarCompare => "barCompare",
            DiagramKind::Comparison => "comparison",
            DiagramKind::StepUp => "stepUp",
            DiagramKind::Lanes => "lanes",
            DiagramKind::FlowChart => "flowChart",
            DiagramKind::Kpi => "kpi",
            DiagramKind::Table => "table",
            DiagramKind::Faq => "faq",
            DiagramKind::Quote => "quote",
            DiagramKind::Progress => "progress",
            DiagramKind::ImageText => "imageText",
            DiagramKind::Agenda => "agenda",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagram layout policy.
///
/// `area` is the only coordinate origin a renderer may use. An empty primary
/// content array draws nothing and is not an error.
pub trait DiagramRenderer: Sync {
    fn kind(&self) -> DiagramKind;

    fn render(
        &self,
        canvas: &mut Canvas<'_>,
        data: &JsonValue,
        area: Rect,
        settings: &Settings,
        layout: &LayoutManager,
    ) -> Result<()>;
}

pub fn renderer_for(kind: DiagramKind) -> &'static dyn DiagramRenderer {
    match kind {
        DiagramKind::Cards => &cards::CardsRenderer,
        DiagramKind::Timeline => &timeline::TimelineRenderer,
        DiagramKind::Process => &process::ProcessRenderer,
        DiagramKind::Cycle => &cycle::CycleRenderer,
        DiagramKind::Pyramid => &pyramid::PyramidRenderer,
        DiagramKind::Triangle => &pyramid::TriangleRenderer,
        DiagramKind::StatsCompare => &compare::StatsCompareRenderer,
        DiagramKind::BarCompare => &compare::BarCompareRenderer,
        DiagramKind::Comparison => &compare::ComparisonRenderer,
        DiagramKind::StepUp => &process::StepUpRenderer,
        DiagramKind::Lanes => &lanes::LanesRenderer,
        DiagramKind::FlowChart => &lanes::FlowChartRenderer,
        DiagramKind::Kpi => &kpi::KpiRenderer,
        DiagramKind::Table => &table::TableRenderer,
        DiagramKind::Faq => &text_blocks::FaqRenderer,
        DiagramKind::Quote => &text_blocks::QuoteRenderer,
        DiagramKind::Progress => &progress::ProgressRenderer,
        DiagramKind::ImageText => &image_text::ImageTextRenderer,
        DiagramKind::Agenda => &text_blocks::AgendaRenderer,
    }
}

/// Resolves a free-text diagram type to its renderer.
pub fn get_renderer(raw: &str) -> Option<&'static dyn DiagramRenderer> {
    DiagramKind::parse(raw).map(renderer_for)
}

/// Deserializes a renderer's content record; `null` yields the default record.
pub(crate) fn parse_content<T>(kind: DiagramKind, data: &JsonValue) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if data.is_null() {
        return Ok(T::default());
    }
    T::deserialize(data).map_err(|source| RenderError::InvalidContent { kind, source })
}

pub(crate) fn ensure_area(area: Rect) -> Result<()> {
    if area.is_empty() {
        return Err(RenderError::EmptyArea(area));
    }
    Ok(())
}

/// Size of each of `n` cells sharing `total` with `gap` between them.
pub(crate) fn split(total: f64, n: usize, gap: f64) -> f64 {
    let n = n.max(1) as f64;
    ((total - gap * (n - 1.0)) / n).max(0.0)
}

/// Position of item `i` in `0..n` as a fraction in `[0, 1]`.
pub(crate) fn ratio(i: usize, n: usize) -> f64 {
    i as f64 / n.saturating_sub(1).max(1) as f64
}

/// Display text of a scalar JSON cell.
pub(crate) fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Numeric value of a JSON cell; accepts `"42%"` and `"1,200"`.
pub(crate) fn number_of(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s
            .trim()
            .trim_end_matches('%')
            .replace(',', "")
            .trim()
            .parse()
            .ok(),
        _ => None,
    }
}

/// An entry given either as a bare string or as `{title, desc}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ItemInput")]
pub struct Item {
    pub title: String,
    pub desc: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemInput {
    Text(String),
    Detailed(DetailedItem),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DetailedItem {
    #[serde(alias = "label", alias = "name", alias = "heading")]
    title: String,
    #[serde(alias = "description", alias = "subLabel", alias = "text", alias = "body")]
    desc: String,
}

impl From<ItemInput> for Item {
    fn from(input: ItemInput) -> Self {
        match input {
            ItemInput::Text(title) => Item {
                title,
                desc: String::new(),
            },
            ItemInput::Detailed(item) => Item {
                title: item.title,
                desc: item.desc,
            },
        }
    }
}

/// Colors and font sizes resolved once per render call.
pub(crate) struct Look {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub muted: String,
    pub white: String,
    pub card: String,
    pub border: String,
    pub faint: String,
    pub light: String,
    pub neutral: String,
    pub positive: String,
    pub negative: String,
    pub title: f64,
    pub subhead: f64,
    pub body: f64,
    pub small: f64,
}

impl Look {
    pub fn new(settings: &Settings, layout: &LayoutManager) -> Self {
        let theme = layout.theme();
        Look {
            primary: settings.primary(theme).to_string(),
            secondary: settings.secondary(theme),
            text: theme.color("textPrimary").to_string(),
            muted: theme.color("textSmall").to_string(),
            white: theme.color("white").to_string(),
            card: theme.color("backgroundGray").to_string(),
            border: theme.color("cardBorder").to_string(),
            faint: theme.color("faintGray").to_string(),
            light: theme.color("lightGray").to_string(),
            neutral: theme.color("neutralGray").to_string(),
            positive: theme.color("positive").to_string(),
            negative: theme.color("negative").to_string(),
            title: theme.font_size("contentTitle"),
            subhead: theme.font_size("subhead"),
            body: theme.font_size("body"),
            small: theme.font_size("small"),
        }
    }

    /// Readable text color on `fill`.
    pub fn on(&self, fill: &str) -> String {
        if contrast_text_color(fill) == "#ffffff" {
            self.white.clone()
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::canvas::{IdGenerator, Intent};

    pub fn area() -> Rect {
        Rect::new(18.75, 99.0, 682.5, 255.0)
    }

    /// Runs a renderer on a 720x405 page with default theme and settings.
    pub fn render_json(kind: DiagramKind, data: JsonValue) -> Vec<Intent> {
        let layout = LayoutManager::with_default_theme(720.0, 405.0);
        let settings = Settings::default();
        let mut ids = IdGenerator::new("test");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#4285f4");
        renderer_for(kind)
            .render(&mut canvas, &data, area(), &settings, &layout)
            .unwrap();
        canvas.into_intents()
    }

    pub fn count<F: Fn(&Intent) -> bool>(intents: &[Intent], pred: F) -> usize {
        intents.iter().filter(|i| pred(i)).count()
    }

    pub fn lines(intents: &[Intent]) -> usize {
        count(intents, |i| matches!(i, Intent::CreateLine { .. }))
    }

    pub fn shapes(intents: &[Intent]) -> usize {
        count(intents, |i| matches!(i, Intent::CreateShape { .. }))
    }

    /// Every created element stays within `area` (with rounding slack).
    pub fn assert_inside(intents: &[Intent], area: Rect) {
        for intent in intents {
            if let Some((id, rect)) = intent.created() {
                assert!(
                    rect.left >= area.left - 0.5
                        && rect.top >= area.top - 0.5
                        && rect.right() <= area.right() + 0.5
                        && rect.bottom() <= area.bottom() + 0.5,
                    "{id} at {rect:?} escapes {area:?}"
                );
                assert!(rect.width >= 0.0 && rect.height >= 0.0);
            }
        }
    }
}
