//! HTTP routes: the page, its form actions, and a JSON snapshot.

use crate::{
    chat::{ChatError, PageView, Settings},
    config::validate_window,
    provider::Connector,
    state::AppState,
};
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use mcore::{SessionError, SlotId};
use openai::Model;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Build the axum router.
pub fn router<C: Connector>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(index::<C>))
        .route("/settings", post(settings::<C>))
        .route("/users", post(add_user::<C>))
        .route("/users/remove", post(remove_last_user::<C>))
        .route("/users/{id}/remove", post(remove_user::<C>))
        .route("/users/{id}/send", post(send::<C>))
        .route("/chat/new", post(new_chat::<C>))
        .route("/archives/clear", post(clear_archives::<C>))
        .route("/api/session", get(snapshot::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A request that could not be served.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The path named a slot that does not exist.
    #[error("unknown user slot {0}")]
    NotFound(SlotId),
    /// A form field was out of range.
    #[error("{0}")]
    BadRequest(String),
    /// The page template failed.
    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }
        (status, self.to_string()).into_response()
    }
}

impl From<SessionError> for RouteError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownSlot(id) => Self::NotFound(id),
        }
    }
}

/// Fields posted by the settings form.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    /// New credential; blank keeps the current one.
    #[serde(default)]
    pub credential: String,
    /// Model name.
    pub model: String,
    /// Memory window K.
    pub window: usize,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub preview_store: Option<String>,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub preview_buffer: Option<String>,
}

/// Fields posted by a user's input form.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    /// Submitted text.
    #[serde(default)]
    pub input: String,
}

async fn index<C: Connector>(State(state): State<AppState<C>>) -> Result<Html<String>, RouteError> {
    let view = state.chat.lock().await.view();
    Ok(Html(state.page.render(&view)?))
}

async fn snapshot<C: Connector>(State(state): State<AppState<C>>) -> Json<PageView> {
    Json(state.chat.lock().await.view())
}

async fn settings<C: Connector>(
    State(state): State<AppState<C>>,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, RouteError> {
    let model: Model = form
        .model
        .parse()
        .map_err(|err| RouteError::BadRequest(format!("{err}")))?;
    validate_window(form.window).map_err(|err| RouteError::BadRequest(err.to_string()))?;

    state.chat.lock().await.update_settings(Settings {
        credential: form.credential,
        model,
        window: form.window,
        preview_store: form.preview_store.is_some(),
        preview_buffer: form.preview_buffer.is_some(),
    });
    Ok(Redirect::to("/"))
}

async fn add_user<C: Connector>(State(state): State<AppState<C>>) -> Redirect {
    state.chat.lock().await.add_user();
    Redirect::to("/")
}

async fn remove_last_user<C: Connector>(State(state): State<AppState<C>>) -> Redirect {
    state.chat.lock().await.remove_last_user();
    Redirect::to("/")
}

async fn remove_user<C: Connector>(
    State(state): State<AppState<C>>,
    Path(id): Path<u64>,
) -> Result<Redirect, RouteError> {
    match state.chat.lock().await.remove_user(SlotId::new(id)) {
        Ok(()) => Ok(Redirect::to("/")),
        Err(ChatError::Session(err)) => Err(err.into()),
        Err(err) => Err(RouteError::BadRequest(err.to_string())),
    }
}

async fn send<C: Connector>(
    State(state): State<AppState<C>>,
    Path(id): Path<u64>,
    Form(form): Form<SendForm>,
) -> Result<Redirect, RouteError> {
    let id = SlotId::new(id);
    let mut chat = state.chat.lock().await;
    match chat.submit(state.connector.as_ref(), id, &form.input).await {
        Err(ChatError::Session(err)) => Err(err.into()),
        // Other failures are shown on the page as the notice.
        _ => Ok(Redirect::to("/")),
    }
}

async fn new_chat<C: Connector>(State(state): State<AppState<C>>) -> Redirect {
    state.chat.lock().await.new_chat();
    Redirect::to("/")
}

async fn clear_archives<C: Connector>(State(state): State<AppState<C>>) -> Redirect {
    state.chat.lock().await.clear_archives();
    Redirect::to("/")
}
