use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    BreakdownRow, DisplaySettings, FormattedSummary, MonthlySample, ProjectionParams, RawParams,
    Summary, ValidationError, YearlySample, breakdown_rows, estimate_goal, project, query_string,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    params: ProjectionParams,
    settings: DisplaySettings,
    monthly: Vec<MonthlySample>,
    yearly: Vec<YearlySample>,
    summary: Summary,
    formatted_summary: FormattedSummary,
    goal_year: Option<f64>,
    goal_month: Option<f64>,
    yearly_breakdown: Vec<BreakdownRow>,
    monthly_breakdown: Vec<BreakdownRow>,
    share_query: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    field: Option<&'static str>,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("compound HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
            field: None,
        },
    )
}

async fn project_get_handler(query: Result<Query<RawParams>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

async fn project_post_handler(body: Result<Json<RawParams>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(rejection) => malformed_request_response(&rejection.body_text()),
    }
}

fn project_handler_impl(payload: RawParams) -> Response {
    match build_project_response(&payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(err) => {
            log::warn!("rejected projection request: {err}");
            validation_error_response(&err)
        }
    }
}

fn build_project_response(payload: &RawParams) -> Result<ProjectResponse, ValidationError> {
    let params = payload.parse()?;
    let settings = payload.display_settings()?;

    let projection = project(&params);
    let summary = projection.summary();
    let estimate = estimate_goal(&projection, params.goal);

    Ok(ProjectResponse {
        formatted_summary: settings.format_summary(&summary),
        goal_year: estimate.year,
        goal_month: estimate.month,
        yearly_breakdown: breakdown_rows(&projection.yearly, params.goal, estimate.year),
        monthly_breakdown: breakdown_rows(&projection.monthly, params.goal, estimate.month),
        share_query: query_string(&params, &settings),
        summary,
        monthly: projection.monthly,
        yearly: projection.yearly,
        params,
        settings,
    })
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn malformed_request_response(msg: &str) -> Response {
    log::warn!("malformed projection request: {msg}");
    json_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse {
            error: msg.to_string(),
            field: None,
        },
    )
}

fn validation_error_response(err: &ValidationError) -> Response {
    json_response(
        StatusCode::BAD_REQUEST,
        ErrorResponse {
            error: err.to_string(),
            field: Some(err.field()),
        },
    )
}
