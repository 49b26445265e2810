use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::advice::{AdviceClient, AdviceConfig, AdviceError};
use crate::core::{
    CityTier, INSURERS, Quote, QuoteRequest, SortBy, ViewOptions, assemble_quotes, find_quote,
    recommended, view,
};
use crate::session::Session;

const INDEX_HTML: &str = include_str!("../../web/index.html");

#[derive(Clone)]
struct AppState {
    session: Arc<RwLock<Session>>,
}

/// Wire payload for `/api/quotes`. Every field is optional and merges over
/// the built-in defaults, so a bare request still yields the full catalog.
/// GET callers pass add-ons as a comma-separated `addons` parameter; POST
/// callers use the `selectedAddons` array.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct QuotesPayload {
    vehicle_value: Option<f64>,
    car_age: Option<f64>,
    city_tier: Option<CityTier>,
    ncb_percent: Option<f64>,
    selected_addons: Option<Vec<String>>,
    addons: Option<String>,
    search: Option<String>,
    sort_by: Option<SortBy>,
    #[serde(alias = "minCSR")]
    min_csr: Option<f64>,
    min_cashless: Option<u32>,
    max_premium: Option<i64>,
    view: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuotesResponse {
    quotes: Vec<Quote>,
    recommended_quote_id: Option<String>,
    view_breakup: Option<Quote>,
    showing: usize,
    total: usize,
}

/// Wire payload for `/api/advice`, mirroring the advisory proxy contract.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AdvicePayload {
    quote_form: Option<QuoteRequest>,
    quotes: Vec<Quote>,
    selected_quote_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct AdviceOk {
    ok: bool,
    answer: String,
}

#[derive(Debug, Serialize)]
struct AdviceFail {
    ok: bool,
    error: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct CheckoutPayload {
    quote: Quote,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_quotes_request(payload: QuotesPayload) -> (QuoteRequest, ViewOptions, Option<String>) {
    let mut request = QuoteRequest::default();
    if let Some(v) = payload.vehicle_value {
        request.vehicle_value = v;
    }
    if let Some(v) = payload.car_age {
        request.car_age = v;
    }
    if let Some(v) = payload.city_tier {
        request.city_tier = v;
    }
    if let Some(v) = payload.ncb_percent {
        request.ncb_percent = v;
    }
    if let Some(v) = payload.selected_addons {
        request.selected_addons = v;
    } else if let Some(csv) = payload.addons {
        request.selected_addons = csv
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .collect();
    }

    let mut options = ViewOptions::default();
    if let Some(v) = payload.search {
        options.search = v;
    }
    if let Some(v) = payload.sort_by {
        options.sort_by = v;
    }
    if let Some(v) = payload.min_csr {
        options.min_csr = v;
    }
    if let Some(v) = payload.min_cashless {
        options.min_cashless = v;
    }
    if let Some(v) = payload.max_premium {
        options.max_premium = v;
    }

    (request, options, payload.view)
}

fn build_quotes_response(payload: QuotesPayload) -> QuotesResponse {
    let (request, options, view_id) = build_quotes_request(payload);
    let all = assemble_quotes(&INSURERS, &request);
    let viewed = view(&all, &options);
    let recommended_quote_id = recommended(&viewed).map(|quote| quote.quote_id.clone());
    let view_breakup = view_id
        .as_deref()
        .and_then(|id| find_quote(&all, id))
        .cloned();

    QuotesResponse {
        recommended_quote_id,
        view_breakup,
        showing: viewed.len(),
        total: all.len(),
        quotes: viewed,
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let state = AppState {
        session: Arc::new(RwLock::new(Session::new())),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(
            "/api/quotes",
            get(quotes_get_handler).post(quotes_post_handler),
        )
        .route(
            "/api/session/form",
            get(session_form_get_handler).post(session_form_post_handler),
        )
        .route("/api/session", delete(session_clear_handler))
        .route(
            "/api/checkout",
            get(checkout_get_handler).post(checkout_post_handler),
        )
        .route("/api/advice", post(advice_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("quote comparison API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn quotes_get_handler(Query(payload): Query<QuotesPayload>) -> Response {
    json_response(StatusCode::OK, build_quotes_response(payload))
}

async fn quotes_post_handler(Json(payload): Json<QuotesPayload>) -> Response {
    json_response(StatusCode::OK, build_quotes_response(payload))
}

async fn session_form_post_handler(
    State(state): State<AppState>,
    Json(form): Json<QuoteRequest>,
) -> Response {
    state
        .session
        .write()
        .expect("session lock poisoned")
        .save_form(&form);
    json_response(StatusCode::OK, form)
}

async fn session_form_get_handler(State(state): State<AppState>) -> Response {
    let form = state
        .session
        .read()
        .expect("session lock poisoned")
        .load_form();
    match form {
        Some(form) => json_response(StatusCode::OK, form),
        None => error_response(StatusCode::NOT_FOUND, "No session; start at the entry form"),
    }
}

async fn session_clear_handler(State(state): State<AppState>) -> Response {
    state
        .session
        .write()
        .expect("session lock poisoned")
        .clear();
    with_cache_control(StatusCode::NO_CONTENT)
}

async fn checkout_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutPayload>,
) -> Response {
    state
        .session
        .write()
        .expect("session lock poisoned")
        .save_selected(&payload.quote);
    json_response(StatusCode::OK, payload)
}

async fn checkout_get_handler(State(state): State<AppState>) -> Response {
    let selected = state
        .session
        .read()
        .expect("session lock poisoned")
        .load_selected();
    match selected {
        Some(quote) => json_response(StatusCode::OK, quote),
        None => error_response(StatusCode::NOT_FOUND, "No quote selected; return to quotes"),
    }
}

fn validate_advice(payload: &AdvicePayload) -> Result<(&QuoteRequest, &Quote), (StatusCode, &'static str)> {
    let form = payload
        .quote_form
        .as_ref()
        .ok_or((StatusCode::BAD_REQUEST, "Missing quoteForm"))?;
    if payload.quotes.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing quotes"));
    }
    let quote_id = payload
        .selected_quote_id
        .as_deref()
        .ok_or((StatusCode::BAD_REQUEST, "Missing selectedQuoteId"))?;
    let selected = find_quote(&payload.quotes, quote_id)
        .ok_or((StatusCode::NOT_FOUND, "Selected quote not found"))?;
    Ok((form, selected))
}

async fn advice_handler(Json(payload): Json<AdvicePayload>) -> Response {
    let (form, selected) = match validate_advice(&payload) {
        Ok(validated) => validated,
        Err((status, msg)) => return advice_error(status, msg),
    };

    let client = match AdviceClient::new(AdviceConfig::default()) {
        Ok(client) => client,
        Err(e) => return advice_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    };

    match client.advise(form, &payload.quotes, selected).await {
        Ok(answer) => json_response(StatusCode::OK, AdviceOk { ok: true, answer }),
        Err(e) => {
            error!("advice upstream call failed: {e}");
            let status = match e {
                AdviceError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            };
            advice_error(status, &e.to_string())
        }
    }
}

fn advice_error(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        AdviceFail {
            ok: false,
            error: msg.to_string(),
        },
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
