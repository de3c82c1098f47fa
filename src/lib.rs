//! Theme-driven slide layout and diagram rendering for Google Slides.
//!
//! A [`DeckRequest`] is planned slide by slide into drawing [`Intent`]s, which a
//! [`PresentationSurface`] replays: [`BatchRecorder`] turns them into
//! `presentations.batchUpdate` requests, a live surface can draw them directly.

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
pub mod client;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
pub use client::{
    batch_update_sa, copy_presentation_sa, generate_presentation_sa, get_presentation_sa,
};

pub mod canvas;
pub mod color;
pub mod deck;
pub mod errors;
pub mod layout;
pub mod models;
pub mod render;
pub mod settings;
pub mod slides;
pub mod surface;
pub mod text;
pub mod theme;

pub use canvas::{IdGenerator, Intent};
pub use deck::{DeckRequest, SlideSpec};
pub use errors::{Result, SlidesApiError};
pub use layout::{LayoutManager, Rect};
pub use models::presentation::Presentation;
pub use render::{get_renderer, DiagramKind, DiagramRenderer};
pub use settings::Settings;
pub use slides::{PresentationGenerator, SlidePlan};
pub use surface::{apply_intents, BatchRecorder, PresentationSurface};
pub use theme::Theme;

// features
#[cfg(feature = "diff")]
pub mod diff;
#[cfg(feature = "diff")]
pub use diff::BatchComparerBuilder;

use log::info;
use wasm_bindgen::prelude::*;

/// Plans `deck` on a page of the given size and records it as batch requests.
pub fn build_requests(deck: &DeckRequest, page_width_pt: f64, page_height_pt: f64) -> serde_json::Result<BatchRecorder> {
    let layout = LayoutManager::new(page_width_pt, page_height_pt, deck.theme()?);
    let generator = PresentationGenerator::new(layout, deck.settings.clone());
    let mut ids = IdGenerator::random();
    let plans = generator.plan(&deck.slides, &mut ids);
    let mut recorder = BatchRecorder::new(ids);
    let skipped: usize = plans.iter().map(|plan| recorder.record_plan(plan)).sum();
    info!(
        "[build_requests] {} slides -> {} requests ({skipped} intents skipped)",
        plans.len(),
        recorder.requests().len()
    );
    Ok(recorder)
}

/// JSON deck in, JSON array of `batchUpdate` requests out.
#[wasm_bindgen]
pub fn build_batch_requests(deck_json: &str, page_width_pt: f64, page_height_pt: f64) -> std::result::Result<String, JsValue> {
    let to_js = |e: serde_json::Error| JsValue::from_str(&e.to_string());
    let deck = DeckRequest::from_json_str(deck_json).map_err(to_js)?;
    build_requests(&deck, page_width_pt, page_height_pt)
        .and_then(|recorder| recorder.to_json())
        .map_err(to_js)
}

/// Routes `log` output to the browser console on wasm, to `env_logger` elsewhere.
#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);

    #[cfg(not(target_arch = "wasm32"))]
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
