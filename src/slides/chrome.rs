//! Title, footer and post-render placement shared by the slide categories.

use log::debug;

use super::{region_or, SlideContext};
use crate::canvas::{Canvas, TextOptions, TextTarget};
use crate::deck::SlideSpec;
use crate::layout::{LayoutManager, Rect};
use crate::models::placeholder::PlaceholderType;
use crate::models::properties::Alignment;
use crate::models::shape_properties::ContentAlignment;
use crate::render::Look;
use crate::settings::Settings;
use crate::text::{fit_font_size, strip_markup};

const TITLE_PLACEHOLDERS: [PlaceholderType; 2] = [PlaceholderType::Title, PlaceholderType::CenteredTitle];

/// Writes `text` into a live placeholder when there is one, else into a new text
/// box at the theme region `path`.
pub(super) fn place_text(
    canvas: &mut Canvas<'_>,
    layout: &LayoutManager,
    ctx: &SlideContext,
    kinds: &[PlaceholderType],
    path: &str,
    text: &str,
    options: &TextOptions,
) {
    if text.trim().is_empty() {
        return;
    }
    match ctx.placeholder(kinds) {
        Some(placeholder) => {
            canvas.set_text(TextTarget::Shape(placeholder.object_id.clone()), text, options)
        }
        None => {
            canvas.text_box(layout.get_rect(path), text, options);
        }
    }
}

/// Title, optional underline and optional subhead of content and diagram slides.
pub(super) fn content_title(
    canvas: &mut Canvas<'_>,
    spec: &SlideSpec,
    ctx: &SlideContext,
    settings: &Settings,
    layout: &LayoutManager,
) {
    let look = Look::new(settings, layout);
    let rect = region_or(layout, ctx.placeholder(&TITLE_PLACEHOLDERS), "contentSlide.title");
    let size = fit_font_size(&strip_markup(&spec.title), rect.width, rect.height, look.title, look.subhead);
    let options = TextOptions::new(size, &look.text).bold();
    place_text(canvas, layout, ctx, &TITLE_PLACEHOLDERS, "contentSlide.title", &spec.title, &options);

    if settings.show_title_underline && !spec.title.trim().is_empty() {
        canvas.rect(layout.get_rect("contentSlide.titleUnderline"), &look.primary);
    }
    if let Some(subtitle) = &spec.subtitle {
        let options = TextOptions::new(look.subhead, &look.muted);
        place_text(canvas, layout, ctx, &[PlaceholderType::Subtitle], "contentSlide.subhead", subtitle, &options);
    }
}

/// Footer text, page number and bottom bar, each as enabled in `settings`.
pub(super) fn footer(canvas: &mut Canvas<'_>, ctx: &SlideContext, settings: &Settings, layout: &LayoutManager) {
    let theme = layout.theme();
    let look = Look::new(settings, layout);
    let size = theme.font_size("footer");

    let text = settings.footer_text(theme);
    if !text.trim().is_empty() {
        canvas.text_box(
            layout.get_rect("footer.leftText"),
            text,
            &TextOptions::new(size, &look.muted),
        );
    }
    if settings.show_page_number {
        canvas.text_box(
            layout.get_rect("footer.rightPage"),
            &(ctx.index + 1).to_string(),
            &TextOptions::new(size, &look.muted).align(Alignment::End),
        );
    }
    if settings.show_bottom_bar {
        let bar = layout.get_rect("bottomBar");
        if !bar.is_empty() {
            canvas.rect(bar, &look.primary);
        }
    }
}

/// Groups everything created since `mark` and moves it to the middle of `area`.
///
/// The group is moved as a whole by one relative translation. Tables cannot join
/// a group and are moved by the same delta on their own.
pub(super) fn group_and_center(canvas: &mut Canvas<'_>, mark: usize, area: Rect) {
    let created = canvas.created_since(mark);
    let Some(bounds) = created.iter().map(|(_, rect, _)| *rect).reduce(|a, b| a.union(&b)) else {
        return;
    };
    let dx = area.left + (area.width - bounds.width) / 2.0 - bounds.left;
    let dy = area.top + (area.height - bounds.height) / 2.0 - bounds.top;
    debug!(
        "[group_and_center] {} elements, bounds {bounds:?}, delta ({dx:.2}, {dy:.2})",
        created.len()
    );

    let (members, tables): (Vec<_>, Vec<_>) = created.into_iter().partition(|(_, _, groupable)| *groupable);
    let mut members: Vec<String> = members.into_iter().map(|(id, _, _)| id).collect();
    if members.len() == 1 {
        if let Some(only) = members.pop() {
            canvas.translate(&only, dx, dy);
        }
    } else if let Some(group_id) = canvas.group(members) {
        canvas.translate(&group_id, dx, dy);
    }
    for (table_id, _, _) in tables {
        canvas.translate(&table_id, dx, dy);
    }
}

/// Text box for a list of bullet lines, font fitted to `rect`.
pub(super) fn bullets(canvas: &mut Canvas<'_>, rect: Rect, lines: &[String], look: &Look, max_size: f64) {
    let text = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    if text.is_empty() || rect.is_empty() {
        return;
    }
    let size = fit_font_size(&strip_markup(&text), rect.width, rect.height, max_size, look.small);
    canvas.text_box(
        rect,
        &text,
        &TextOptions::new(size, &look.text).valign(ContentAlignment::Top),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{IdGenerator, Intent};

    #[test]
    fn centering_moves_the_group_once() {
        let mut ids = IdGenerator::new("c");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#4285f4");
        canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0), "#ffffff");
        let mark = canvas.mark();
        canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0), "#ffffff");
        canvas.rect(Rect::new(30.0, 0.0, 10.0, 20.0), "#ffffff");
        group_and_center(&mut canvas, mark, Rect::new(100.0, 100.0, 200.0, 100.0));

        let intents = canvas.intents();
        let group = intents.iter().filter(|i| matches!(i, Intent::Group { .. })).count();
        assert_eq!(group, 1);
        match intents.last() {
            Some(Intent::Translate { dx, dy, .. }) => {
                assert!((dx - 180.0).abs() < 1e-9);
                assert!((dy - 140.0).abs() < 1e-9);
            }
            other => panic!("expected a translate, got {other:?}"),
        }
    }

    #[test]
    fn single_element_and_tables_move_alone() {
        let mut ids = IdGenerator::new("c");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#4285f4");
        let shape = canvas.rect(Rect::new(0.0, 0.0, 10.0, 10.0), "#ffffff");
        let table = canvas.table(2, 2, Rect::new(0.0, 20.0, 10.0, 10.0));
        group_and_center(&mut canvas, 0, Rect::new(0.0, 0.0, 110.0, 30.0));

        let moved: Vec<&str> = canvas
            .intents()
            .iter()
            .filter_map(|i| match i {
                Intent::Translate { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(moved, vec![shape.as_str(), table.as_str()]);
        assert!(!canvas.intents().iter().any(|i| matches!(i, Intent::Group { .. })));
    }

    #[test]
    fn blank_bullets_draw_nothing() {
        let layout = LayoutManager::with_default_theme(720.0, 405.0);
        let look = Look::new(&Settings::default(), &layout);
        let mut ids = IdGenerator::new("c");
        let mut canvas = Canvas::new(&mut ids, "Arial", "#4285f4");
        bullets(&mut canvas, Rect::new(0.0, 0.0, 100.0, 100.0), &["  ".to_string()], &look, 18.0);
        assert!(canvas.is_empty());
    }
}
