//! One-line suggested collection messages for the per-customer endpoints.
//!
//! Callers may pass their own template. Only `{cliente}` and `{total}` are
//! substituted; `{{` and `}}` produce literal braces and any other brace
//! sequence is copied through unchanged, so a template never reaches anything
//! beyond those two values.

use crate::money::{format_plain_amount, Amount};
use crate::reminder::display_name;

pub const CUSTOMER_PLACEHOLDER: &str = "cliente";
pub const TOTAL_PLACEHOLDER: &str = "total";

/// Builds the suggested message for `customer` owing `balance`.
///
/// A blank `template` is treated as absent.
pub fn build_suggested_message(customer: &str, balance: &Amount, template: Option<&str>) -> String {
    let name = display_name(customer);
    let total = format_plain_amount(balance);

    match template.filter(|t| !t.trim().is_empty()) {
        Some(template) => render_template(template, &name, &total),
        None => format!(
            "Hi {}, we show an outstanding balance of ${}. Can we help you settle it today?",
            name, total
        ),
    }
}

/// Substitutes `{cliente}` and `{total}` in a caller-supplied template.
pub fn render_template(template: &str, customer: &str, total: &str) -> String {
    let mut out = String::with_capacity(template.len() + customer.len() + total.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('{') {
            match tail.find('}') {
                Some(end) => {
                    match &tail[1..end] {
                        CUSTOMER_PLACEHOLDER => out.push_str(customer),
                        TOTAL_PLACEHOLDER => out.push_str(total),
                        _ => out.push_str(&tail[..=end]),
                    }
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        } else {
            out.push('}');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}
