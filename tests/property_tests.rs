/// Property-based tests using proptest
/// Tests invariants that should hold for all amounts, tones and languages
use cxc_reporting_api::money::{format_money, Amount, ZERO_AMOUNT};
use cxc_reporting_api::reminder::{
    resolve_tone_language, AccountSnapshot, Language, PresentationOverrides, ReminderComposer,
    ReminderDefaults, Tone,
};
use proptest::prelude::*;
use regex::Regex;

fn money_pattern() -> Regex {
    Regex::new(r"^\$-?\d{1,3}(,\d{3})*\.\d{2}$").unwrap()
}

fn composer() -> ReminderComposer {
    ReminderComposer::new(ReminderDefaults {
        company_name: "Acme Beauty".to_string(),
        payment_url: "https://pay.acme.test/".to_string(),
        contact_email: "billing@acme.test".to_string(),
        contact_phone: "+1 555 0100".to_string(),
        tone: "friendly".to_string(),
    })
}

fn cells() -> Vec<(Tone, Language)> {
    Tone::ALL
        .into_iter()
        .flat_map(|t| Language::ALL.into_iter().map(move |l| (t, l)))
        .collect()
}

// Property: money formatting never panics and always has the currency shape
proptest! {
    #[test]
    fn format_money_never_panics(value in any::<f64>()) {
        let formatted = format_money(&Amount::from_f64(value));
        if value.is_finite() {
            prop_assert!(money_pattern().is_match(&formatted), "bad shape: {}", formatted);
        } else {
            prop_assert_eq!(formatted, ZERO_AMOUNT);
        }
    }

    #[test]
    fn format_money_from_arbitrary_strings(raw in "\\PC*") {
        let formatted = format_money(&Amount::from_json(&serde_json::Value::String(raw)));
        prop_assert!(money_pattern().is_match(&formatted), "bad shape: {}", formatted);
    }

    #[test]
    fn format_money_non_numeric_strings_are_zero(raw in "[a-zA-Z ]{0,16}") {
        let formatted = format_money(&Amount::from_json(&serde_json::Value::String(raw)));
        prop_assert_eq!(formatted, ZERO_AMOUNT);
    }
}

// Property: tone and language fallbacks
proptest! {
    #[test]
    fn unknown_tone_uses_valid_configured_default(
        tone in "[a-z]{0,12}",
        default in prop::sample::select(vec!["professional", "friendly", "short"])
    ) {
        prop_assume!(Tone::parse(&tone).is_none());
        let (resolved, _) = resolve_tone_language(Some(&tone), None, default);
        prop_assert_eq!(Some(resolved), Tone::parse(default));
    }

    #[test]
    fn unknown_tone_and_invalid_default_is_professional(
        tone in "[a-z]{0,12}",
        default in "[a-z]{0,12}"
    ) {
        prop_assume!(Tone::parse(&tone).is_none());
        prop_assume!(Tone::parse(&default).is_none());
        let (resolved, _) = resolve_tone_language(Some(&tone), None, &default);
        prop_assert_eq!(resolved, Tone::Professional);
    }

    #[test]
    fn unknown_language_is_english(lang in "\\PC{0,8}") {
        prop_assume!(Language::parse(&lang).is_none());
        let (_, resolved) = resolve_tone_language(None, Some(&lang), "professional");
        prop_assert_eq!(resolved, Language::En);
    }
}

// Property: composition is deterministic and never leaks credit fields
proptest! {
    #[test]
    fn composition_is_idempotent(
        name in "[A-Za-z ]{0,20}",
        balance in -1_000_000i64..1_000_000i64,
        tone in prop::sample::select(vec!["professional", "friendly", "short", "other"]),
        lang in prop::sample::select(vec!["en", "es", "xx"])
    ) {
        let account = AccountSnapshot::new(name, Amount::from_f64(balance as f64 / 100.0));
        let opts = PresentationOverrides {
            tone: Some(tone.to_string()),
            language: Some(lang.to_string()),
            ..Default::default()
        };
        let c = composer();
        prop_assert_eq!(c.compose(&account, &opts), c.compose(&account, &opts));
    }

    #[test]
    fn credit_fields_never_leak(
        balance in 1u32..1_000u32,
        total in 1u32..1_000u32,
        limit_whole in 100_000u32..999_999u32,
        available_whole in 100_000u32..999_999u32,
        score in 100_000u32..999_999u32,
        cents in 10u32..99u32
    ) {
        let limit = format!("{}.{}", limit_whole, cents);
        let available = format!("{}.{}", available_whole, cents);
        let score_text = score.to_string();

        let mut account = AccountSnapshot::new("Ana", Amount::from_f64(balance as f64))
            .with_total_receivable(Amount::from_f64(total as f64));
        account.credit_limit = Some(Amount::from_json(&serde_json::json!(limit.clone())));
        account.available_credit = Some(Amount::from_json(&serde_json::json!(available.clone())));
        account.risk_score = Some(Amount::from_json(&serde_json::json!(score)));

        let c = composer();
        for (tone, lang) in cells() {
            let opts = PresentationOverrides {
                tone: Some(tone.as_str().to_string()),
                language: Some(lang.as_str().to_string()),
                ..Default::default()
            };
            let msg = c.compose(&account, &opts);
            for secret in [&limit, &available, &score_text] {
                prop_assert!(!msg.contains(secret.as_str()), "{} leaked in {}", secret, msg);
            }
            prop_assert!(!msg.contains(&format_money(account.credit_limit.as_ref().unwrap())));
            prop_assert!(!msg.contains(&format_money(account.available_credit.as_ref().unwrap())));
        }
    }
}
