use std::env;

use cxc_reporting_api::db::Database;
use cxc_reporting_api::money::{format_money, Amount};
use cxc_reporting_api::reports::ReportingStore;

/// Integration smoke test for the reporting views.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn reporting_views_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let store = ReportingStore::new(db.pool.clone());

    assert!(store.ping().await.map_err(|e| anyhow::anyhow!(e.to_string()))?);

    let summaries = store
        .customer_summaries(0.0, 5)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(summaries.len() <= 5);

    // Rows come back largest balance first.
    for pair in summaries.windows(2) {
        assert!(pair[0].saldo_cliente >= pair[1].saldo_cliente);
    }

    let aging = store
        .aging(0.0, 5)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(aging.len() <= 5);

    if let Some(first) = summaries.first() {
        let account = store
            .customer_account(&first.cliente_id)
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .ok_or_else(|| anyhow::anyhow!("summary customer has no account row"))?;

        let rendered = format_money(&Amount::from(account.saldo_cliente));
        assert!(rendered.starts_with('$'));

        store
            .pending_invoices(&first.cliente_id)
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    let missing = store
        .customer_account("no-such-customer-id")
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(missing.is_none());

    Ok(())
}
