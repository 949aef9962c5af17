use crate::errors::AppError;
use crate::money::Amount;
use crate::reminder::{AccountSnapshot, PresentationOverrides};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

// ============ Reporting View Rows ============

/// One customer from `reporting.v_cxc_resumen_clientes`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomerSummary {
    pub cliente_id: String,
    pub cliente: Option<String>,
    pub telefono: Option<String>,
    /// Number of sales still carrying a balance.
    pub ventas_con_saldo: Option<i64>,
    #[serde(serialize_with = "serialize_decimal")]
    pub saldo_cliente: Option<BigDecimal>,
}

/// Aging buckets for one customer from `reporting.v_cxc_aging_clientes`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgingRow {
    pub cliente_id: String,
    pub cliente: Option<String>,
    #[serde(serialize_with = "serialize_decimal")]
    pub d0_30: Option<BigDecimal>,
    #[serde(serialize_with = "serialize_decimal")]
    pub d31_60: Option<BigDecimal>,
    #[serde(serialize_with = "serialize_decimal")]
    pub d61_90: Option<BigDecimal>,
    #[serde(serialize_with = "serialize_decimal")]
    pub d90_plus: Option<BigDecimal>,
    #[serde(serialize_with = "serialize_decimal")]
    pub total: Option<BigDecimal>,
}

/// One open invoice from `reporting.v_cxc_pendientes_detalle`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingInvoice {
    pub numero_factura: Option<String>,
    pub fecha: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_decimal")]
    pub pendiente: Option<BigDecimal>,
    pub dias: Option<i32>,
}

/// Name, phone and balance used to build per-customer messages.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerAccount {
    pub cliente: Option<String>,
    pub telefono: Option<String>,
    pub saldo_cliente: Option<BigDecimal>,
}

/// Serializes decimals as JSON numbers, which is what dashboard clients read.
fn serialize_decimal<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.as_ref().and_then(decimal_to_f64) {
        Some(v) => serializer.serialize_f64(v),
        None => serializer.serialize_none(),
    }
}

pub fn decimal_to_f64(value: &BigDecimal) -> Option<f64> {
    value.to_string().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ============ Query Parameters ============

pub const DEFAULT_REPORT_LIMIT: i64 = 200;
pub const MAX_REPORT_LIMIT: i64 = 10_000;
pub const DEFAULT_TOP_LIMIT: i64 = 10;
pub const MAX_TOP_LIMIT: i64 = 1_000;
pub const DEFAULT_MIN_AMOUNT: f64 = 0.05;

/// Query parameters for `/cxc/resumen`.
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub limit: Option<i64>,
    pub min_saldo: Option<f64>,
}

/// Query parameters for `/cxc/aging`.
#[derive(Debug, Deserialize)]
pub struct AgingParams {
    pub limit: Option<i64>,
    pub min_total: Option<f64>,
}

/// Query parameters for the top-customer endpoints.
#[derive(Debug, Deserialize)]
pub struct TopParams {
    pub limit: Option<i64>,
}

/// Query parameters for `/cxc/clientes/:id/mensaje`.
#[derive(Debug, Deserialize)]
pub struct MessageParams {
    pub plantilla: Option<String>,
}

/// Returns `value` (or `default`) if it lies within `1..=max`.
pub fn validate_limit(value: Option<i64>, default: i64, max: i64) -> Result<i64, AppError> {
    let limit = value.unwrap_or(default);
    if !(1..=max).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            max
        )));
    }
    Ok(limit)
}

/// Returns `value` (or `default`) if it is a finite non-negative amount.
pub fn validate_min_amount(name: &str, value: Option<f64>, default: f64) -> Result<f64, AppError> {
    let amount = value.unwrap_or(default);
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::Validation(format!(
            "{} must be greater than or equal to 0",
            name
        )));
    }
    Ok(amount)
}

// ============ API Request/Response Models ============

/// Request payload for `POST /reminder`.
///
/// Amounts are coerced leniently (see [`Amount`]). `limite`, `disponible`
/// and `score` are accepted but never shown to the customer.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderRequest {
    pub cliente: String,
    #[serde(default)]
    pub saldo: Amount,
    #[serde(default)]
    pub limite: Option<Amount>,
    #[serde(default)]
    pub disponible: Option<Amount>,
    #[serde(default)]
    pub total_cxc: Option<Amount>,
    #[serde(default)]
    pub score: Option<Amount>,

    pub company: Option<String>,
    pub pay_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    /// `professional`, `friendly` or `short`.
    pub tone: Option<String>,
    /// `en` or `es`.
    pub lang: Option<String>,
}

impl ReminderRequest {
    pub fn account(&self) -> AccountSnapshot {
        AccountSnapshot {
            customer_name: self.cliente.clone(),
            balance: self.saldo.clone(),
            total_receivable: self.total_cxc.clone(),
            credit_limit: self.limite.clone(),
            available_credit: self.disponible.clone(),
            risk_score: self.score.clone(),
        }
    }

    pub fn overrides(&self) -> PresentationOverrides {
        PresentationOverrides {
            company_name: self.company.clone(),
            payment_url: self.pay_url.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            tone: self.tone.clone(),
            language: self.lang.clone(),
        }
    }
}

/// Response payload for `POST /reminder`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub ok: bool,
    pub message: String,
}

/// Optional body for `POST /cxc/clientes/:id/recordatorio`.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionReminderRequest {
    pub plantilla: Option<String>,
}

/// Response for `GET /cxc/clientes/:id/mensaje`.
#[derive(Debug, Serialize)]
pub struct SuggestedMessageResponse {
    pub cliente: Option<String>,
    pub saldo_total: f64,
    pub mensaje_sugerido: String,
}

/// Response for `POST /cxc/clientes/:id/recordatorio`.
#[derive(Debug, Serialize)]
pub struct CollectionReminderResponse {
    pub cliente: Option<String>,
    pub telefono: Option<String>,
    pub saldo_total: f64,
    pub mensaje_sugerido: String,
    pub detalle: Vec<PendingInvoice>,
}
