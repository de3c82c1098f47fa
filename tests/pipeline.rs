use gslides_composer::models::requests::Request;
use gslides_composer::{
    get_renderer, BatchRecorder, DeckRequest, DiagramKind, DiagramRenderer, IdGenerator, LayoutManager,
    PresentationGenerator, Theme,
};
use serde_json::{json, Value as JsonValue};

fn deck() -> DeckRequest {
    serde_json::from_value(json!({
        "title": "Pipeline",
        "settings": {"primaryColor": "#0b8043"},
        "slides": [
            {"layout": "TITLE", "title": "Pipeline **test**"},
            {"layout": "SECTION", "title": "Part one"},
            {"title": "Bullets", "content": ["alpha", "beta"]},
            {"title": "Steps", "diagramType": "process", "steps": ["Plan", "Build", "Ship"]},
            {"title": "Grid", "diagramType": "table", "headers": ["A", "B"], "rows": [["1", "2", "3"]]},
            {"title": "Lanes", "diagramType": "lanes", "lanes": [
                {"title": "Ops", "items": ["a", "b", "c"]},
                {"title": "Dev", "items": ["d"]}
            ]},
            {"title": "Mystery", "diagramType": "nothingLikeThis"}
        ]
    }))
    .unwrap()
}

fn record(deck: &DeckRequest) -> Vec<JsonValue> {
    let _ = env_logger::builder().is_test(true).try_init();
    let layout = LayoutManager::new(720.0, 405.0, deck.theme().unwrap());
    let generator = PresentationGenerator::new(layout, deck.settings.clone());
    let mut ids = IdGenerator::new("it");
    let plans = generator.plan(&deck.slides, &mut ids);
    assert_eq!(plans.len(), deck.slides.len());

    let mut recorder = BatchRecorder::new(ids);
    let skipped: usize = plans.iter().map(|plan| recorder.record_plan(plan)).sum();
    assert_eq!(skipped, 0);
    let json = recorder.to_json().unwrap();
    serde_json::from_str::<Vec<JsonValue>>(&json).unwrap()
}

fn body<'a>(request: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    request.get(name)
}

#[test]
fn deck_becomes_a_valid_batch() {
    let requests = record(&deck());
    let slides = requests.iter().filter(|r| body(r, "createSlide").is_some()).count();
    assert_eq!(slides, 7);

    // every request parses back into the typed model
    for request in &requests {
        serde_json::from_value::<Request>(request.clone()).unwrap();
    }

    for request in &requests {
        if let Some(create) = body(request, "createShape") {
            let props = &create["elementProperties"];
            assert_eq!(props["size"]["width"]["unit"], "PT");
            assert_eq!(props["transform"]["unit"], "PT");
            assert_eq!(props["transform"]["scaleX"], 1.0);
        }
        for name in ["updateShapeProperties", "updateTextStyle", "updateLineProperties"] {
            if let Some(update) = body(request, name) {
                let fields = update["fields"].as_str().unwrap();
                assert!(!fields.is_empty());
                assert!(!fields.contains(",,"));
            }
        }
    }
}

#[test]
fn table_uses_the_widest_row() {
    let requests = record(&deck());
    let table = requests
        .iter()
        .find_map(|r| body(r, "createTable"))
        .expect("table slide produced no table");
    assert_eq!(table["columns"], 3);
    assert_eq!(table["rows"], 2);
}

#[test]
fn diagrams_are_grouped_and_moved_relative() {
    let requests = record(&deck());
    let groups = requests.iter().filter(|r| body(r, "groupObjects").is_some()).count();
    // process and lanes slides; the table moves alone and the unknown type draws nothing
    assert_eq!(groups, 2);
    assert!(requests
        .iter()
        .filter_map(|r| body(r, "updatePageElementTransform"))
        .all(|t| t["applyMode"] == "RELATIVE"));
}

#[test]
fn brand_color_reaches_the_batch() {
    let requests = record(&deck());
    let green = json!({"red": 11.0 / 255.0, "green": 128.0 / 255.0, "blue": 67.0 / 255.0});
    let uses_brand = requests.iter().filter_map(|r| body(r, "updateShapeProperties")).any(|u| {
        let rgb = &u["shapeProperties"]["shapeBackgroundFill"]["solidFill"]["color"]["rgbColor"];
        ["red", "green", "blue"]
            .iter()
            .all(|c| (rgb[*c].as_f64().unwrap_or(-1.0) - green[*c].as_f64().unwrap()).abs() < 1e-3)
    });
    assert!(uses_brand);
}

#[test]
fn renderer_lookup_from_outside() {
    assert_eq!(get_renderer("statsCompare").unwrap().kind(), DiagramKind::StatsCompare);
    assert!(get_renderer("unknownThing").is_none());
}

#[test]
fn title_scenario_on_a_16_9_page() {
    let layout = LayoutManager::new(720.0, 405.0, Theme::default());
    let rect = layout.get_rect("titleSlide.title");
    assert!((rect.left - 45.0).abs() < 1e-9);
}
