//! Payment-reminder composition.
//!
//! Turns an [`AccountSnapshot`] plus caller overrides into the final reminder
//! text. Composition is a pure function of its inputs and the
//! [`ReminderDefaults`] captured at startup: no I/O, no clock, no shared
//! mutable state, so a single [`ReminderComposer`] is shared by every request.
//!
//! Six message shapes exist, one per `(Tone, Language)` pair. They are kept
//! as separate rendering functions behind [`renderer_for`] so that each cell
//! reads top to bottom and adding a tone or language is a local change.

use crate::money::{format_money, Amount};
use serde::{Deserialize, Serialize};

/// Name used when the customer name is blank.
pub const DEFAULT_CUSTOMER_NAME: &str = "customer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Short,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Friendly, Tone::Short];

    /// Case-insensitive parse of a tone name, ignoring surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "professional" => Some(Tone::Professional),
            "friendly" => Some(Tone::Friendly),
            "short" => Some(Tone::Short),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Es];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

/// Resolves the requested tone and language.
///
/// An unrecognized or missing tone falls back to `configured_default_tone`,
/// and if that is unrecognized as well, to [`Tone::Professional`]. An
/// unrecognized or missing language falls back to [`Language::En`].
pub fn resolve_tone_language(
    tone_in: Option<&str>,
    lang_in: Option<&str>,
    configured_default_tone: &str,
) -> (Tone, Language) {
    let tone = tone_in
        .and_then(Tone::parse)
        .or_else(|| Tone::parse(configured_default_tone))
        .unwrap_or(Tone::Professional);
    let language = lang_in.and_then(Language::parse).unwrap_or(Language::En);
    (tone, language)
}

/// Company identity and contact channels configured for the process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReminderDefaults {
    pub company_name: String,
    pub payment_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    /// Raw tone name; validated at composition time, never at startup.
    pub tone: String,
}

/// Per-request presentation overrides. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PresentationOverrides {
    pub company_name: Option<String>,
    pub payment_url: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
}

/// Effective presentation after overrides and fallbacks are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub company_name: String,
    pub payment_url: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub tone: Tone,
    pub language: Language,
}

fn override_or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.trim().to_string(),
    }
}

/// Applies caller overrides field by field on top of the configured defaults.
pub fn resolve_overrides(
    overrides: &PresentationOverrides,
    defaults: &ReminderDefaults,
) -> Presentation {
    let (tone, language) = resolve_tone_language(
        overrides.tone.as_deref(),
        overrides.language.as_deref(),
        &defaults.tone,
    );

    Presentation {
        company_name: override_or_default(overrides.company_name.as_deref(), &defaults.company_name),
        payment_url: override_or_default(overrides.payment_url.as_deref(), &defaults.payment_url),
        contact_email: override_or_default(
            overrides.contact_email.as_deref(),
            &defaults.contact_email,
        ),
        contact_phone: override_or_default(
            overrides.contact_phone.as_deref(),
            &defaults.contact_phone,
        ),
        tone,
        language,
    }
}

/// Trimmed customer name, or [`DEFAULT_CUSTOMER_NAME`] when blank.
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CUSTOMER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Account figures for one reminder.
///
/// `credit_limit`, `available_credit` and `risk_score` are accepted so callers
/// can pass a full account record, but no template ever reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountSnapshot {
    pub customer_name: String,
    pub balance: Amount,
    pub total_receivable: Option<Amount>,
    pub credit_limit: Option<Amount>,
    pub available_credit: Option<Amount>,
    pub risk_score: Option<Amount>,
}

impl AccountSnapshot {
    pub fn new(customer_name: impl Into<String>, balance: Amount) -> Self {
        Self {
            customer_name: customer_name.into(),
            balance,
            ..Default::default()
        }
    }

    pub fn with_total_receivable(mut self, total: Amount) -> Self {
        self.total_receivable = Some(total);
        self
    }
}

/// Everything a template cell may print.
#[derive(Debug, Clone)]
pub struct MessageContext<'a> {
    pub name: &'a str,
    pub balance: &'a str,
    pub total: Option<&'a str>,
    pub presentation: &'a Presentation,
}

pub type Renderer = fn(&MessageContext<'_>) -> String;

/// Dispatch table from `(tone, language)` to the template cell.
pub fn renderer_for(tone: Tone, language: Language) -> Renderer {
    match (tone, language) {
        (Tone::Short, Language::En) => short_en,
        (Tone::Short, Language::Es) => short_es,
        (Tone::Friendly, Language::En) => friendly_en,
        (Tone::Friendly, Language::Es) => friendly_es,
        (Tone::Professional, Language::En) => professional_en,
        (Tone::Professional, Language::Es) => professional_es,
    }
}

fn short_en(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    format!(
        "{} — Balance {}. Pay: {} • Help: {} / {}",
        p.company_name, ctx.balance, p.payment_url, p.contact_phone, p.contact_email
    )
}

fn short_es(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    format!(
        "{} — Saldo {}. Pagar: {} • Ayuda: {} / {}",
        p.company_name, ctx.balance, p.payment_url, p.contact_phone, p.contact_email
    )
}

fn friendly_en(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    let mut lines = vec![
        format!("Hello {}, this is {} 😊", ctx.name, p.company_name),
        "Just a friendly reminder about your account.".to_string(),
        format!("Outstanding balance: {}.", ctx.balance),
    ];
    if let Some(total) = ctx.total {
        lines.push(format!("Total A/R: {}.", total));
    }
    lines.push(format!(
        "You can choose a payment option here: {}",
        p.payment_url
    ));
    lines.push(format!(
        "If you have any questions, reply here or contact us at {} or {}.",
        p.contact_email, p.contact_phone
    ));
    lines.push(format!("Thank you for your business! — {}", p.company_name));
    lines.join("\n")
}

fn friendly_es(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    let mut lines = vec![
        format!("Hola {}! Te saluda {} 😊", ctx.name, p.company_name),
        format!("Tu saldo pendiente es {}.", ctx.balance),
    ];
    if let Some(total) = ctx.total {
        lines.push(format!("Total CxC: {}.", total));
    }
    lines.push(format!("Puedes pagar aquí: {}", p.payment_url));
    lines.push(format!(
        "Si tienes preguntas, respóndenos o contáctanos en {} o {}.",
        p.contact_email, p.contact_phone
    ));
    lines.push(format!("¡Gracias por tu preferencia! — {}", p.company_name));
    lines.join("\n")
}

fn professional_en(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    let mut lines = vec![
        format!("Hello {}, this is {}.", ctx.name, p.company_name),
        "This is a friendly reminder about your account.".to_string(),
        format!("Outstanding balance: {}.", ctx.balance),
    ];
    if let Some(total) = ctx.total {
        lines.push(format!("Total A/R: {}.", total));
    }
    lines.push(format!("Payment options: {}", p.payment_url));
    lines.push(format!(
        "For questions: {} | {}",
        p.contact_email, p.contact_phone
    ));
    lines.push(format!("Thank you. — {}", p.company_name));
    lines.join("\n")
}

fn professional_es(ctx: &MessageContext<'_>) -> String {
    let p = ctx.presentation;
    let mut lines = vec![
        format!("Hola {}, le escribe {}.", ctx.name, p.company_name),
        "Este es un recordatorio sobre su cuenta.".to_string(),
        format!("Saldo pendiente: {}.", ctx.balance),
    ];
    if let Some(total) = ctx.total {
        lines.push(format!("Total por cobrar: {}.", total));
    }
    lines.push(format!("Opciones de pago: {}", p.payment_url));
    lines.push(format!("Consultas: {} | {}", p.contact_email, p.contact_phone));
    lines.push(format!("Gracias por su preferencia. — {}", p.company_name));
    lines.join("\n")
}

/// Renders one message from already formatted pieces.
///
/// `short` cells ignore `total`; the multi-line cells print it on its own
/// line only when present.
pub fn compose(
    name: &str,
    balance_text: &str,
    total_text: Option<&str>,
    presentation: &Presentation,
) -> String {
    let ctx = MessageContext {
        name,
        balance: balance_text,
        total: total_text,
        presentation,
    };
    renderer_for(presentation.tone, presentation.language)(&ctx)
}

/// Composes reminders against a fixed set of configured defaults.
#[derive(Debug, Clone)]
pub struct ReminderComposer {
    defaults: ReminderDefaults,
}

impl ReminderComposer {
    pub fn new(defaults: ReminderDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ReminderDefaults {
        &self.defaults
    }

    pub fn presentation(&self, overrides: &PresentationOverrides) -> Presentation {
        resolve_overrides(overrides, &self.defaults)
    }

    /// Produces the reminder text for `account`.
    pub fn compose(&self, account: &AccountSnapshot, overrides: &PresentationOverrides) -> String {
        let presentation = self.presentation(overrides);
        let name = display_name(&account.customer_name);
        let balance = format_money(&account.balance);
        let total = account.total_receivable.as_ref().map(format_money);

        tracing::debug!(
            tone = presentation.tone.as_str(),
            lang = presentation.language.as_str(),
            has_total = total.is_some(),
            "Composing reminder"
        );

        compose(&name, &balance, total.as_deref(), &presentation)
    }
}
