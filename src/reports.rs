use crate::errors::{AppError, ResultExt};
use crate::models::{AgingRow, CustomerAccount, CustomerSummary, PendingInvoice};
use sqlx::PgPool;

const SUMMARY_COLUMNS: &str = r#"
    cliente_id::text AS cliente_id,
    cliente::text AS cliente,
    telefono::text AS telefono,
    ventas_con_saldo::bigint AS ventas_con_saldo,
    saldo_cliente::numeric AS saldo_cliente
"#;

/// Read-only access to the accounts-receivable views in the `reporting` schema.
///
/// The views are owned by the database; this service only selects from them.
#[derive(Clone)]
pub struct ReportingStore {
    pool: PgPool,
}

impl ReportingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Customers whose balance is at least `min_balance`, largest first.
    pub async fn customer_summaries(
        &self,
        min_balance: f64,
        limit: i64,
    ) -> Result<Vec<CustomerSummary>, AppError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM reporting.v_cxc_resumen_clientes
            WHERE saldo_cliente >= $1
            ORDER BY saldo_cliente DESC
            LIMIT $2
            "#
        );

        sqlx::query_as::<_, CustomerSummary>(&sql)
            .bind(min_balance)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Error querying customer summary")
    }

    /// Aging buckets for customers whose total is at least `min_total`.
    pub async fn aging(&self, min_total: f64, limit: i64) -> Result<Vec<AgingRow>, AppError> {
        sqlx::query_as::<_, AgingRow>(
            r#"
            SELECT
                cliente_id::text AS cliente_id,
                cliente::text AS cliente,
                d0_30::numeric AS d0_30,
                d31_60::numeric AS d31_60,
                d61_90::numeric AS d61_90,
                d90_plus::numeric AS d90_plus,
                total::numeric AS total
            FROM reporting.v_cxc_aging_clientes
            WHERE total >= $1
            ORDER BY total DESC
            LIMIT $2
            "#,
        )
        .bind(min_total)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Error querying aging")
    }

    /// Open invoices for one customer, oldest first.
    pub async fn pending_invoices(&self, customer_id: &str) -> Result<Vec<PendingInvoice>, AppError> {
        sqlx::query_as::<_, PendingInvoice>(
            r#"
            SELECT
                numero_factura::text AS numero_factura,
                fecha::date AS fecha,
                pendiente::numeric AS pendiente,
                dias::int AS dias
            FROM reporting.v_cxc_pendientes_detalle
            WHERE cliente_id::text = $1
            ORDER BY fecha
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Error querying pending invoices for {}", customer_id))
    }

    pub async fn customer_top(
        &self,
        customer_id: &str,
        limit: i64,
    ) -> Result<Vec<CustomerSummary>, AppError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM reporting.v_cxc_resumen_clientes
            WHERE cliente_id::text = $1
            ORDER BY saldo_cliente DESC
            LIMIT $2
            "#
        );

        sqlx::query_as::<_, CustomerSummary>(&sql)
            .bind(customer_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Error querying top rows for {}", customer_id))
    }

    pub async fn top_customers(&self, limit: i64) -> Result<Vec<CustomerSummary>, AppError> {
        let sql = format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM reporting.v_cxc_resumen_clientes
            ORDER BY saldo_cliente DESC
            LIMIT $1
            "#
        );

        sqlx::query_as::<_, CustomerSummary>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Error querying top customers")
    }

    /// Name, phone and balance for one customer, if the customer has a
    /// summary row.
    pub async fn customer_account(
        &self,
        customer_id: &str,
    ) -> Result<Option<CustomerAccount>, AppError> {
        sqlx::query_as::<_, CustomerAccount>(
            r#"
            SELECT
                cliente::text AS cliente,
                telefono::text AS telefono,
                saldo_cliente::numeric AS saldo_cliente
            FROM reporting.v_cxc_resumen_clientes
            WHERE cliente_id::text = $1
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Error querying account for {}", customer_id))
    }

    /// Round-trips `SELECT 1` and reports whether the database answered `1`.
    pub async fn ping(&self) -> Result<bool, AppError> {
        let (ok,): (i32,) = sqlx::query_as("SELECT 1 AS ok")
            .fetch_one(&self.pool)
            .await
            .context("Error pinging database")?;
        Ok(ok == 1)
    }
}
