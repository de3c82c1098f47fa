use std::{env, fs};

use anyhow::Context;
use gslides_composer::{build_requests, DeckRequest};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let deck_path = args.get(1).map_or("demos/sample_deck.json", String::as_str);
    let output_path = args.get(2).map_or("requests.json", String::as_str);

    log::info!("Loading deck from {deck_path}...");
    let json = fs::read_to_string(deck_path).with_context(|| format!("reading {deck_path}"))?;
    let deck = DeckRequest::from_json_str(&json).context("parsing deck JSON")?;

    let recorder = build_requests(&deck, 720.0, 405.0)?;
    fs::write(output_path, recorder.to_json()?).with_context(|| format!("writing {output_path}"))?;
    log::info!(
        "{} slides -> {} requests written to {output_path}",
        deck.slides.len(),
        recorder.requests().len()
    );
    Ok(())
}
