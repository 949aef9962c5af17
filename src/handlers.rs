use crate::config::Config;
use crate::db::mask_dsn;
use crate::errors::{AppError, ResultExt};
use crate::models::*;
use crate::money::Amount;
use crate::reminder::ReminderComposer;
use crate::reports::ReportingStore;
use crate::suggestion::build_suggested_message;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Reminder composer bound to the configured defaults.
    pub composer: ReminderComposer,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let composer = ReminderComposer::new(config.reminder.clone());
        Self {
            db,
            config,
            composer,
        }
    }

    pub fn store(&self) -> ReportingStore {
        ReportingStore::new(self.db.clone())
    }
}

/// Routes that sit behind the rate limiter.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/docs", get(crate::docs::serve_swagger_ui))
        .route("/api-docs/openapi.yml", get(crate::docs::serve_openapi_spec))
        .route("/cxc/resumen", get(customer_summary))
        .route("/cxc/aging", get(aging))
        .route("/cxc/clientes/top", get(top_customers))
        .route("/cxc/clientes/:cliente_id/top", get(customer_top))
        .route("/cxc/clientes/:cliente_id/pendientes", get(pending_invoices))
        .route("/cxc/clientes/:cliente_id/mensaje", get(suggested_message))
        .route(
            "/cxc/clientes/:cliente_id/recordatorio",
            post(collection_reminder),
        )
        .route("/reminder", post(make_reminder))
}

/// GET /
pub async fn root() -> &'static str {
    "CxC Reporting API up. See /docs"
}

/// GET /health
///
/// Reports whether the database answers and which (masked) DSN is in use.
/// Answers 500 when the database cannot be reached.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let dsn = mask_dsn(&state.config.database_url);

    match state.store().ping().await {
        Ok(db_ok) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "db": db_ok,
                "dsn": dsn,
                "service": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "ok": false,
                    "error": e.status_and_message().1,
                    "dsn": dsn,
                })),
            )
        }
    }
}

/// GET /cxc/resumen
///
/// Customers with a balance of at least `min_saldo`, largest balance first.
pub async fn customer_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    tracing::info!("GET /cxc/resumen - params: {:?}", params);

    let limit = validate_limit(params.limit, DEFAULT_REPORT_LIMIT, MAX_REPORT_LIMIT)?;
    let min_saldo = validate_min_amount("min_saldo", params.min_saldo, DEFAULT_MIN_AMOUNT)?;

    let rows = state.store().customer_summaries(min_saldo, limit).await?;
    tracing::debug!("Customer summary returned {} rows", rows.len());

    Ok(Json(rows))
}

/// GET /cxc/aging
pub async fn aging(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AgingParams>,
) -> Result<Json<Vec<AgingRow>>, AppError> {
    tracing::info!("GET /cxc/aging - params: {:?}", params);

    let limit = validate_limit(params.limit, DEFAULT_REPORT_LIMIT, MAX_REPORT_LIMIT)?;
    let min_total = validate_min_amount("min_total", params.min_total, DEFAULT_MIN_AMOUNT)?;

    let rows = state.store().aging(min_total, limit).await?;
    Ok(Json(rows))
}

/// GET /cxc/clientes/:cliente_id/pendientes
pub async fn pending_invoices(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<String>,
) -> Result<Json<Vec<PendingInvoice>>, AppError> {
    tracing::info!("GET /cxc/clientes/{}/pendientes", cliente_id);

    let rows = state.store().pending_invoices(&cliente_id).await?;
    Ok(Json(rows))
}

/// GET /cxc/clientes/:cliente_id/top
pub async fn customer_top(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<String>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    tracing::info!("GET /cxc/clientes/{}/top - params: {:?}", cliente_id, params);

    let limit = validate_limit(params.limit, DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT)?;
    let rows = state.store().customer_top(&cliente_id, limit).await?;
    Ok(Json(rows))
}

/// GET /cxc/clientes/top
pub async fn top_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    tracing::info!("GET /cxc/clientes/top - params: {:?}", params);

    let limit = validate_limit(params.limit, DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT)?;
    let rows = state.store().top_customers(limit).await?;
    Ok(Json(rows))
}

async fn find_account(state: &AppState, cliente_id: &str) -> Result<CustomerAccount, AppError> {
    state
        .store()
        .customer_account(cliente_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente no encontrado o sin saldo.".to_string()))
}

/// GET /cxc/clientes/:cliente_id/mensaje
///
/// Suggested one-line collection message, optionally from a caller template
/// using `{cliente}` and `{total}`.
pub async fn suggested_message(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<String>,
    Query(params): Query<MessageParams>,
) -> Result<Json<SuggestedMessageResponse>, AppError> {
    tracing::info!("GET /cxc/clientes/{}/mensaje", cliente_id);

    let account = find_account(&state, &cliente_id)
        .await
        .context("Error generating message")?;

    let balance = Amount::from(account.saldo_cliente.clone());
    let mensaje = build_suggested_message(
        account.cliente.as_deref().unwrap_or_default(),
        &balance,
        params.plantilla.as_deref(),
    );

    Ok(Json(SuggestedMessageResponse {
        cliente: account.cliente,
        saldo_total: account
            .saldo_cliente
            .as_ref()
            .and_then(decimal_to_f64)
            .unwrap_or(0.0),
        mensaje_sugerido: mensaje,
    }))
}

/// POST /cxc/clientes/:cliente_id/recordatorio
///
/// Suggested message plus the customer's phone and open invoices. The body
/// is optional; `{"plantilla": "..."}` overrides the default wording.
/// A request without a JSON content type carries no template, but a JSON
/// body that fails to parse is rejected before the database is queried.
pub async fn collection_reminder(
    State(state): State<Arc<AppState>>,
    Path(cliente_id): Path<String>,
    body: Result<Json<CollectionReminderRequest>, JsonRejection>,
) -> Result<Json<CollectionReminderResponse>, AppError> {
    tracing::info!("POST /cxc/clientes/{}/recordatorio", cliente_id);

    let plantilla = match body {
        Ok(Json(request)) => request.plantilla,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };

    let account = find_account(&state, &cliente_id)
        .await
        .context("Error generating reminder")?;
    let detalle = state
        .store()
        .pending_invoices(&cliente_id)
        .await
        .context("Error generating reminder")?;

    let balance = Amount::from(account.saldo_cliente.clone());
    let mensaje = build_suggested_message(
        account.cliente.as_deref().unwrap_or_default(),
        &balance,
        plantilla.as_deref(),
    );

    tracing::debug!(
        "Reminder for {} built with {} pending invoice(s)",
        cliente_id,
        detalle.len()
    );

    Ok(Json(CollectionReminderResponse {
        cliente: account.cliente,
        telefono: account.telefono,
        saldo_total: account
            .saldo_cliente
            .as_ref()
            .and_then(decimal_to_f64)
            .unwrap_or(0.0),
        mensaje_sugerido: mensaje,
        detalle,
    }))
}

/// POST /reminder
///
/// Composes a payment reminder from the account figures in the body. Never
/// fails on malformed amounts or unknown tone/language; those fall back to
/// defaults.
pub async fn make_reminder(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ReminderRequest>, JsonRejection>,
) -> Result<Json<ReminderResponse>, AppError> {
    let Json(body) = body?;
    tracing::info!(
        "POST /reminder - tone: {:?}, lang: {:?}",
        body.tone,
        body.lang
    );

    let message = state.composer.compose(&body.account(), &body.overrides());

    Ok(Json(ReminderResponse { ok: true, message }))
}
