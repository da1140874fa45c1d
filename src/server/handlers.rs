use super::{
    docs,
    types::{AskResponse, DocsQuery},
};
use crate::{
    Error, Result,
    ask::{answer_questions, parse_questions},
    llm::{ImageInput, VisionClient},
};
use axum::{
    extract::{
        Multipart, Query, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::{path::PathBuf, sync::Arc};
use tracing::{error, info, warn};
use uuid::Uuid;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn VisionClient>,
    pub docs_dir: PathBuf,
    pub system_prompt: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn ask(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<AskResponse>> {
    let request_id = Uuid::new_v4();

    let form = match multipart {
        Ok(multipart) => read_ask_form(multipart).await,
        Err(rejection) => Err(Error::invalid_input(rejection.body_text())),
    };

    let (image, questions) = match form {
        Ok(form) => form,
        Err(e) => {
            warn!(%request_id, "Rejected ask request: {}", e);
            return Err(e);
        }
    };

    info!(
        %request_id,
        questions = questions.len(),
        image_bytes = image.data.len(),
        mime_type = %image.mime_type,
        "Received ask request"
    );

    match answer_questions(
        state.client.as_ref(),
        image,
        questions,
        state.system_prompt.clone(),
    )
    .await
    {
        Ok(results) => {
            info!(%request_id, results = results.len(), "Answered ask request");
            Ok(Json(AskResponse { results }))
        }
        Err(e) => {
            error!(%request_id, "Failed to answer questions: {}", e);
            Err(e)
        }
    }
}

async fn read_ask_form(mut multipart: Multipart) -> Result<(ImageInput, Vec<String>)> {
    let mut image = None;
    let mut raw_questions = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                // Generic binary uploads carry no useful type; fall back to the extension.
                let mime_type = field
                    .content_type()
                    .filter(|ct| *ct != OCTET_STREAM)
                    .map(str::to_string)
                    .unwrap_or_else(|| guess_mime_type(field.file_name()).to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read file", e))?;
                image = Some(ImageInput::new(mime_type, data));
            }
            Some("questions") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Failed to read questions", e))?;
                raw_questions = Some(text);
            }
            _ => {}
        }
    }

    let image = image
        .filter(|image| !image.data.is_empty())
        .ok_or_else(|| Error::invalid_input("No file provided"))?;
    let raw_questions = raw_questions
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| Error::invalid_input("No questions provided"))?;
    let questions = parse_questions(&raw_questions)?;

    Ok((image, questions))
}

fn multipart_error(context: &str, e: MultipartError) -> Error {
    let message = format!("{}: {}", context, e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge(message)
    } else {
        Error::invalid_input(message)
    }
}

fn guess_mime_type(file_name: Option<&str>) -> &'static str {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => OCTET_STREAM,
    }
}

pub async fn serve_doc(
    State(state): State<AppState>,
    Query(query): Query<DocsQuery>,
) -> Result<Response> {
    let name = query
        .file
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::invalid_input("File parameter is required"))?;

    let content = docs::read(&state.docs_dir, &name).await?;

    Ok(([(header::CONTENT_TYPE, docs::content_type(&name))], content).into_response())
}
