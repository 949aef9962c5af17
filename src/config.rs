use crate::db::mask_dsn;
use crate::reminder::ReminderDefaults;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_COMPANY_NAME: &str = "Care Beauty Supply";
pub const DEFAULT_PAY_URL: &str = "https://carebeautysupply.carrd.co/";
pub const DEFAULT_CONTACT_EMAIL: &str = "tools4care@gmail.com";
pub const DEFAULT_CONTACT_PHONE: &str = "+1 (781) 953-1475 & +1 (857) 856-0030";
pub const DEFAULT_REMINDER_TONE: &str = "professional";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Allowed CORS origins; `["*"]` means any origin without credentials.
    pub cors_allow_origins: Vec<String>,
    pub reminder: ReminderDefaults,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::info!("Using DATABASE_URL -> {}", mask_dsn(&config.database_url));
        tracing::debug!("CORS origins: {:?}", config.cors_allow_origins);
        tracing::debug!(
            "Reminder defaults: company={}, tone={}",
            config.reminder.company_name,
            config.reminder.tone
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DB_URL"))
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required"))
            .and_then(|url| {
                if url.trim().is_empty() {
                    anyhow::bail!("DATABASE_URL cannot be empty");
                }
                if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                    anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                }
                Ok(url)
            })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            None => DEFAULT_PORT,
        };

        let cors_allow_origins = parse_origins(lookup("CORS_ALLOW_ORIGINS").as_deref());

        let with_default = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let reminder = ReminderDefaults {
            company_name: with_default("COMPANY_NAME", DEFAULT_COMPANY_NAME),
            payment_url: with_default("PAY_URL", DEFAULT_PAY_URL),
            contact_email: with_default("CONTACT_EMAIL", DEFAULT_CONTACT_EMAIL),
            contact_phone: with_default("CONTACT_PHONE", DEFAULT_CONTACT_PHONE),
            // Kept raw: an invalid tone is resolved per request, not rejected here.
            tone: with_default("REMINDER_TONE", DEFAULT_REMINDER_TONE).to_lowercase(),
        };

        Ok(Self {
            database_url,
            port,
            cors_allow_origins,
            reminder,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
