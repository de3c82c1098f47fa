use std::{env, fs};

use anyhow::{bail, Context};
use dotenvy::dotenv;
use gslides_composer::{client, DeckRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --example generate_presentation --features yup-oauth2 -- <DECK_JSON> <TEMPLATE_ID>");
        eprintln!("Ensure GOOGLE_APPLICATION_CREDENTIALS is set in your environment or .env file.");
        bail!("missing arguments");
    }
    let json = fs::read_to_string(&args[1]).with_context(|| format!("reading {}", args[1]))?;
    let mut deck = DeckRequest::from_json_str(&json)?;
    deck.template_id = Some(args[2].clone());

    let http_client = reqwest::Client::new();
    let generated = client::generate_presentation_sa(&deck, &http_client).await?;
    log::info!(
        "Created https://docs.google.com/presentation/d/{}/edit with {} slides ({} intents skipped)",
        generated.presentation_id,
        generated.slide_ids.len(),
        generated.skipped_intents
    );
    Ok(())
}
