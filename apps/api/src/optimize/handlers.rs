//! Axum route handlers for the optimization API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::{AppStatus, OptimizationResult, ResumeFile, UserInput};
use crate::optimize::encoder::encode_attachment;
use crate::optimize::prompts::{compose_prompt, SYSTEM_INSTRUCTION};
use crate::optimize::splitter::split_response;
use crate::state::AppState;

/// Shown to the user when the model call fails; detail goes to the logs.
const GENERATION_FAILED_MESSAGE: &str = "Generation failed. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub status: AppStatus,
    pub result: OptimizationResult,
}

/// Snapshot of the session for the SPA to render from.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub status: AppStatus,
    pub result: Option<OptimizationResult>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/optimize
///
/// One submission: multipart form in, tailored résumé + strategy out.
/// Validates, enters Generating, encodes the attachment, composes the prompt,
/// issues the single model call, splits the response, and settles the session
/// with exactly one of Success/Error.
pub async fn handle_optimize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OptimizeResponse>, AppError> {
    let input = read_input(multipart).await?;
    validate(&input, &state.catalog)?;

    // Enter Generating before any suspension point; a concurrent submission
    // sees the busy session and gets a 409.
    state
        .session
        .lock()
        .expect("session mutex poisoned")
        .begin()
        .map_err(|e| AppError::Conflict(e.to_string()))?;

    if let Some(file) = &input.file {
        tracing::info!(
            company = %input.company,
            role = %input.role,
            file = %file.name,
            size = file.bytes.len(),
            "Starting resume optimization"
        );
    }

    // The pipeline runs in its own task: hyper drops this handler future when
    // the client disconnects, and the session must still settle to exactly
    // one of Success/Error rather than stay Generating forever.
    let task_state = state.clone();
    let outcome = tokio::spawn(async move {
        let outcome = run_generation(&task_state, &input).await;
        let mut session = task_state.session.lock().expect("session mutex poisoned");
        match outcome {
            Ok(result) => session
                .succeed(result.clone())
                .map_err(|e| AppError::Internal(e.into()))
                .map(|()| result),
            Err(err) => {
                session
                    .fail(GENERATION_FAILED_MESSAGE)
                    .map_err(|e| AppError::Internal(e.into()))?;
                Err(err)
            }
        }
    })
    .await;

    match outcome {
        Ok(Ok(result)) => Ok(Json(OptimizeResponse {
            status: AppStatus::Success,
            result,
        })),
        Ok(Err(err)) => Err(err),
        Err(join_err) => {
            // The task died before settling; do not leave the session wedged.
            if let Ok(mut session) = state.session.lock() {
                let _ = session.fail(GENERATION_FAILED_MESSAGE);
            }
            Err(AppError::Internal(anyhow::anyhow!(
                "Generation task failed: {join_err}"
            )))
        }
    }
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().expect("session mutex poisoned");
    Json(SessionResponse {
        status: session.status,
        result: session.result.clone(),
        error: session.error.clone(),
    })
}

/// POST /api/v1/session/reset
///
/// The explicit reset event: Success or Error back to Idle, discarding the
/// stored result and error. Rejected while a generation is in flight.
pub async fn handle_reset(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session
        .reset()
        .map_err(|e| AppError::Conflict(e.to_string()))?;
    Ok(Json(SessionResponse {
        status: session.status,
        result: None,
        error: None,
    }))
}

/// GET /api/v1/catalog
///
/// Companies, seniority levels, and résumé styles for the SPA's form and
/// style picker.
pub async fn handle_get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json((*state.catalog).clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// File encoding then the network call, awaited sequentially — the two
/// suspension points of a submission. The session lock is NOT held here.
async fn run_generation(
    state: &AppState,
    input: &UserInput,
) -> Result<OptimizationResult, AppError> {
    let attachment = match &input.file {
        Some(file) => Some(
            encode_attachment(file)
                .await
                .map_err(|e| AppError::Internal(e.into()))?,
        ),
        None => None,
    };

    let prompt = compose_prompt(input);

    let raw = state
        .llm
        .generate(&prompt, SYSTEM_INSTRUCTION, attachment.as_ref())
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(split_response(&raw, &input.company))
}

async fn read_input(mut multipart: Multipart) -> Result<UserInput, AppError> {
    let mut input = UserInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "company" => input.company = field.text().await?,
            "role" => input.role = field.text().await?,
            "skills" => input.skills = field.text().await?,
            "level" => input.level = field.text().await?,
            "notes" => input.notes = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let mime_type = field.content_type().unwrap_or("application/pdf").to_string();
                let bytes = field.bytes().await?;
                input.file = Some(ResumeFile {
                    name: file_name,
                    mime_type,
                    bytes,
                });
            }
            other => tracing::debug!("Ignoring unknown multipart field: {other}"),
        }
    }

    Ok(input)
}

/// The server-side analogue of the SPA's disabled submit button plus its
/// file-picker filter: required fields present, company and level from the
/// catalog, declared type PDF.
fn validate(input: &UserInput, catalog: &Catalog) -> Result<(), AppError> {
    if !input.is_submittable() {
        return Err(AppError::Validation(missing_field_message(input)));
    }
    if !catalog.has_company(&input.company) {
        return Err(AppError::Validation(format!(
            "Unknown target company: {}",
            input.company
        )));
    }
    if !input.level.trim().is_empty() && !catalog.has_level(&input.level) {
        return Err(AppError::Validation(format!(
            "Unknown seniority level: {}",
            input.level
        )));
    }
    if let Some(file) = &input.file {
        if file.mime_type != "application/pdf" {
            return Err(AppError::Validation(
                "Resume file must be a PDF".to_string(),
            ));
        }
    }
    Ok(())
}

fn missing_field_message(input: &UserInput) -> String {
    if input.company.trim().is_empty() {
        "Target company is required".to_string()
    } else if input.role.trim().is_empty() {
        "Target role is required".to_string()
    } else {
        "Resume file is required".to_string()
    }
}
