//! Renders the sample deck under the built-in theme and under a tweaked one, then
//! prints what moved.

use std::fs;

use anyhow::Context;
use gslides_composer::{
    BatchComparerBuilder, BatchRecorder, DeckRequest, IdGenerator, LayoutManager,
    PresentationGenerator, Theme,
};

fn render(deck: &DeckRequest, theme: Theme) -> Vec<gslides_composer::models::requests::Request> {
    let generator = PresentationGenerator::new(LayoutManager::new(720.0, 405.0, theme), deck.settings.clone());
    // fixed ids so both runs name the same elements alike
    let mut ids = IdGenerator::new("demo");
    let plans = generator.plan(&deck.slides, &mut ids);
    let mut recorder = BatchRecorder::new(ids);
    for plan in &plans {
        recorder.record_plan(plan);
    }
    recorder.into_requests()
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let json = fs::read_to_string("demos/sample_deck.json").context("reading sample deck")?;
    let deck = DeckRequest::from_json_str(&json)?;

    let before = render(&deck, Theme::default());
    let wider = Theme::from_json_str(
        r#"{"positions": {"diagramSlide": {"area": {"left": 40, "top": 140, "width": 880, "height": 330}}}}"#,
    )?;
    let after = render(&deck, wider);

    let comparison = BatchComparerBuilder::new().set_base(before).build()?.compare(&after)?;
    println!("{}", comparison.summary()?);
    println!("{}", comparison.unified_diff()?);
    Ok(())
}
