use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use tracing::{error, warn};

use super::models::{ApiError, FailureView, HealthResponse};
use super::state::AppState;
use super::templates::IndexTemplate;
use crate::metrics;
use crate::types::RawInput;

fn render(template: IndexTemplate) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// The form with its default values. Renders even when no model is loaded.
pub async fn index(State(state): State<AppState>) -> Response {
    render(IndexTemplate::new(&state.predictor, RawInput::default()))
}

/// Form submission: echo the input and show either the estimate or the
/// failure with debug info. An unparseable form re-renders the page with the
/// default values and the rejection message.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<RawInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected form submission");
            let page = IndexTemplate::new(&state.predictor, RawInput::default())
                .with_failure(FailureView::invalid_input(rejection.body_text()));
            return (rejection.status(), render(page)).into_response();
        }
    };
    let page = IndexTemplate::new(&state.predictor, input.clone());
    let page = match state.predictor.predict(&input) {
        Ok(report) => page.with_report(report),
        Err(err) => page.with_failure(FailureView::from(&err)),
    };
    render(page)
}

pub async fn predict_api(State(state): State<AppState>, Json(input): Json<RawInput>) -> Response {
    match state.predictor.predict(&input) {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            let (status, body) = ApiError::from_predictor_error(&err);
            (status, Json(body)).into_response()
        }
    }
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: if state.predictor.is_ready() { "healthy" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        model: state.predictor.status(),
    })
}

pub async fn metrics_text() -> Response {
    match metrics::render() {
        Some(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}
