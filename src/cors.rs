use crate::config::Config;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Builds the CORS policy from `CORS_ALLOW_ORIGINS`.
///
/// `*` allows any origin without credentials (browsers refuse credentials
/// with a wildcard origin). An explicit list allows only those origins and
/// enables credentials.
pub fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.allows_any_origin() {
        return Ok(CorsLayer::permissive());
    }

    let origins = config
        .cors_allow_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!("CORS restricted to {} origin(s)", origins.len());

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::ReminderDefaults;

    fn config_with(origins: &[&str]) -> Config {
        Config {
            database_url: "postgres://localhost/cxc".to_string(),
            port: 8000,
            cors_allow_origins: origins.iter().map(|o| o.to_string()).collect(),
            reminder: ReminderDefaults {
                company_name: "Acme".to_string(),
                payment_url: "https://pay.acme.test".to_string(),
                contact_email: "billing@acme.test".to_string(),
                contact_phone: "555".to_string(),
                tone: "professional".to_string(),
            },
        }
    }

    #[test]
    fn wildcard_is_permissive() {
        assert!(cors_layer(&config_with(&["*"])).is_ok());
    }

    #[test]
    fn explicit_origins_are_accepted() {
        assert!(cors_layer(&config_with(&["https://app.example.com", "http://localhost:5173"])).is_ok());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        assert!(cors_layer(&config_with(&["https://bad\norigin"])).is_err());
    }
}
