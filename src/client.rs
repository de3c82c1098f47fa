use crate::canvas::{IdGenerator, Intent};
use crate::deck::DeckRequest;
use crate::errors::{Result, SlidesApiError};
use crate::layout::LayoutManager;
use crate::models::presentation::Presentation;
use crate::models::requests::{BatchUpdateRequest, BatchUpdateResponse, Request};
use crate::slides::{PresentationGenerator, SlidePlan};
use crate::surface::BatchRecorder;
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

const SLIDES_API: &str = "https://slides.googleapis.com/v1/presentations";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const PRESENTATIONS_SCOPE: &str = "https://www.googleapis.com/auth/presentations";
const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Page size used when a presentation does not report one (16:9, points).
const FALLBACK_PAGE_PT: (f64, f64) = (720.0, 405.0);

#[derive(Deserialize, Debug)]
struct GoogleApiErrorResponse {
    error: GoogleApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct GoogleApiErrorDetail {
    message: String,
}

#[derive(Deserialize, Debug)]
struct DriveFile {
    id: String,
}

/// Outcome of [`generate_presentation_sa`].
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    pub presentation_id: String,
    pub slide_ids: Vec<String>,
    /// Intents the batch recorder refused (logged, not sent).
    pub skipped_intents: usize,
}

/// Access token for the service account named by `GOOGLE_APPLICATION_CREDENTIALS`.
///
/// Call `dotenvy::dotenv().ok();` first when the path lives in a `.env` file.
async fn service_account_token(scopes: &[&str]) -> Result<String> {
    let key_file_path = env::var("GOOGLE_APPLICATION_CREDENTIALS")?;
    let sa_key = read_service_account_key(Path::new(&key_file_path))
        .await
        .map_err(|e| {
            SlidesApiError::AuthSetupError(format!(
                "Failed to read service account key from '{key_file_path}': {e}"
            ))
        })?;
    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;
    let token = auth.token(scopes).await?;
    token
        .token()
        .map(str::to_string)
        .ok_or_else(|| SlidesApiError::AuthSetupError("token response carried no access token".to_string()))
}

/// Decodes a 2xx body as `T`, or turns Google's error envelope into `ApiError`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    if status.is_success() {
        return serde_json::from_slice::<T>(&body).map_err(|e| {
            let snippet = String::from_utf8_lossy(&body[..body.len().min(500)]);
            warn!("[read_json] could not decode response: {e}; body starts with: {snippet}");
            SlidesApiError::Json(e)
        });
    }
    let text = String::from_utf8_lossy(&body);
    let message = match serde_json::from_str::<GoogleApiErrorResponse>(&text) {
        Ok(google_error) => google_error.error.message,
        Err(_) => format!("API request failed with status {status}: {text}"),
    };
    Err(SlidesApiError::ApiError { status, message })
}

fn require_id(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SlidesApiError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Fetches a presentation resource using service account credentials.
pub async fn get_presentation_sa(
    presentation_id: &str,
    http_client: &reqwest::Client,
) -> Result<Presentation> {
    require_id(presentation_id, "Presentation ID")?;
    let token = service_account_token(&[PRESENTATIONS_SCOPE]).await?;
    let response = http_client
        .get(format!("{SLIDES_API}/{presentation_id}"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(ACCEPT, "application/json")
        .send()
        .await?;
    read_json(response).await
}

/// Copies a template presentation through Drive and returns the new file id.
///
/// `destination_folder` becomes the copy's only parent when given.
pub async fn copy_presentation_sa(
    template_id: &str,
    title: &str,
    destination_folder: Option<&str>,
    http_client: &reqwest::Client,
) -> Result<String> {
    require_id(template_id, "Template ID")?;
    let token = service_account_token(&[DRIVE_SCOPE]).await?;
    let mut body = json!({ "name": title });
    if let Some(folder) = destination_folder.filter(|f| !f.trim().is_empty()) {
        body["parents"] = json!([folder]);
    }
    let response = http_client
        .post(format!("{DRIVE_FILES_API}/{template_id}/copy"))
        .query(&[("supportsAllDrives", "true")])
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&body)
        .send()
        .await?;
    let file: DriveFile = read_json(response).await?;
    info!("[copy_presentation_sa] copied '{template_id}' to '{}'", file.id);
    Ok(file.id)
}

/// Sends one `presentations.batchUpdate`. The API applies the batch atomically.
pub async fn batch_update_sa(
    presentation_id: &str,
    requests: &[Request],
    http_client: &reqwest::Client,
) -> Result<BatchUpdateResponse> {
    require_id(presentation_id, "Presentation ID")?;
    if requests.is_empty() {
        return Err(SlidesApiError::InvalidInput("batch has no requests".to_string()));
    }
    let token = service_account_token(&[PRESENTATIONS_SCOPE]).await?;
    let body = BatchUpdateRequest {
        requests: requests.to_vec(),
    };
    debug!(
        "[batch_update_sa] sending {} requests to '{presentation_id}'",
        requests.len()
    );
    let response = http_client
        .post(format!("{SLIDES_API}/{presentation_id}:batchUpdate"))
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .json(&body)
        .send()
        .await?;
    read_json(response).await
}

/// Copies the deck's template, draws every slide in one batch, then writes
/// speaker notes in a second batch once the notes shapes exist.
pub async fn generate_presentation_sa(
    deck: &DeckRequest,
    http_client: &reqwest::Client,
) -> Result<GeneratedDeck> {
    let template_id = deck.template_id.as_deref().ok_or_else(|| {
        SlidesApiError::InvalidInput("templateId is required to start a presentation".to_string())
    })?;
    let presentation_id = copy_presentation_sa(
        template_id,
        &deck.title,
        deck.destination_id.as_deref(),
        http_client,
    )
    .await?;

    let presentation = get_presentation_sa(&presentation_id, http_client).await?;
    let (width, height) = match presentation.page_size_pt() {
        (w, h) if w > 0.0 && h > 0.0 => (w, h),
        _ => FALLBACK_PAGE_PT,
    };
    let layout = LayoutManager::new(width, height, deck.theme()?);
    let generator = PresentationGenerator::new(layout, deck.settings.clone());

    let mut ids = IdGenerator::random();
    let plans = generator.plan(&deck.slides, &mut ids);
    let mut recorder = BatchRecorder::new(ids);
    let skipped_intents = plans.iter().map(|plan| recorder.record_plan(plan)).sum();
    batch_update_sa(&presentation_id, recorder.requests(), http_client).await?;

    let notes = notes_requests(&get_presentation_sa(&presentation_id, http_client).await?, &plans);
    if !notes.is_empty() {
        batch_update_sa(&presentation_id, &notes, http_client).await?;
    }

    Ok(GeneratedDeck {
        presentation_id,
        slide_ids: plans.into_iter().map(|plan| plan.slide_id).collect(),
        skipped_intents,
    })
}

/// Speaker-notes inserts for slides that now exist in `presentation`.
fn notes_requests(presentation: &Presentation, plans: &[SlidePlan]) -> Vec<Request> {
    let mut recorder = BatchRecorder::default();
    for plan in plans {
        let notes: Vec<Intent> = plan
            .intents
            .iter()
            .filter(|i| matches!(i, Intent::SpeakerNotes { .. }))
            .cloned()
            .collect();
        if notes.is_empty() {
            continue;
        }
        match presentation
            .slide(&plan.slide_id)
            .and_then(|slide| slide.speaker_notes_object_id())
        {
            Some(notes_id) => {
                recorder.register_object(&plan.slide_id);
                recorder.set_notes_object_id(&plan.slide_id, notes_id);
                crate::surface::apply_intents(&mut recorder, &plan.slide_id, &notes);
            }
            None => warn!("[notes_requests] slide '{}' has no notes shape", plan.slide_id),
        }
    }
    recorder.into_requests()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requests::PredefinedLayout;

    #[test]
    fn notes_go_to_the_reported_notes_shape() {
        let presentation: Presentation = serde_json::from_value(json!({
            "presentationId": "p",
            "slides": [{
                "objectId": "s_001",
                "slideProperties": {"notesPage": {
                    "objectId": "n1",
                    "notesProperties": {"speakerNotesObjectId": "notes_shape"}
                }}
            }]
        }))
        .unwrap();
        let plans = vec![
            SlidePlan {
                slide_id: "s_001".into(),
                layout: PredefinedLayout::Blank,
                intents: vec![Intent::SpeakerNotes { text: "hello".into() }],
            },
            SlidePlan {
                slide_id: "s_002".into(),
                layout: PredefinedLayout::Blank,
                intents: vec![Intent::SpeakerNotes { text: "lost".into() }],
            },
        ];
        let requests = notes_requests(&presentation, &plans);
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            Request::InsertText(r) => {
                assert_eq!(r.object_id, "notes_shape");
                assert_eq!(r.text, "hello");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_ids_are_rejected_up_front() {
        assert!(matches!(
            require_id(" ", "Presentation ID"),
            Err(SlidesApiError::InvalidInput(_))
        ));
    }
}
