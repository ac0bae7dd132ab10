use crate::catalog::{LanguageCatalog, LanguageEntry};
use crate::config::Config;
use crate::form::{FormError, FormHandle, FormState, PostedForm};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub form: FormHandle,
}

/// Fields posted by the browser form.
#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    pub language_from: String,
    pub language_to: String,
    #[serde(default)]
    pub text_from: String,
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let status = match &self {
            FormError::UnknownLanguage(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FormError::ControllerStopped => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, self.to_string()).into_response()
    }
}

pub fn create_router(form: FormHandle) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/state", get(get_state))
        .route("/api/languages", get(list_languages))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { form })
}

/// Bind to the configured address and serve until the process stops.
pub async fn serve(config: &Config, form: FormHandle) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on http://{}", address);

    axum::serve(listener, create_router(form))
        .await
        .context("HTTP server error")
}

async fn show_form(State(state): State<AppState>) -> Result<Html<String>, FormError> {
    Ok(Html(state.form.render().await?))
}

/// Apply the posted fields, start a translation and go back to the form.
///
/// The fields and the submission reach the controller as one command, so a
/// concurrent post cannot interleave with them. A bad code leaves the form
/// untouched. The redirect does not wait for the translation.
async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<SubmitForm>,
) -> Result<Redirect, FormError> {
    let posted = PostedForm {
        source_language: fields.language_from,
        target_language: fields.language_to,
        input_text: fields.text_from,
    };

    match state.form.apply_and_submit(posted).await {
        Ok(_) => Ok(Redirect::to("/")),
        Err(e) => {
            warn!("Rejected form post: {}", e);
            Err(e)
        }
    }
}

async fn get_state(State(state): State<AppState>) -> Result<Json<FormState>, FormError> {
    Ok(Json(state.form.snapshot().await?))
}

async fn list_languages() -> Json<Vec<LanguageEntry>> {
    Json(LanguageCatalog::get().list().into_iter().copied().collect())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
