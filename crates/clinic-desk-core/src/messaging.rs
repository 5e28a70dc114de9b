//! Outbound messaging: pre-filled WhatsApp links summarizing a visit.

use crate::config::ClinicProfile;
use crate::ledger::BillTotals;
use crate::models::format_amount;

/// Strip spaces, dashes, and `+` from a phone string, and prefix the
/// country code when it is not already present.
pub fn normalize_phone(raw: &str, country_code: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+'))
        .collect();
    if digits.starts_with(country_code) {
        digits
    } else {
        format!("{country_code}{digits}")
    }
}

/// Templated post-visit summary.
pub fn visit_summary(
    profile: &ClinicProfile,
    patient_name: &str,
    totals: &BillTotals,
    amount_paid: f64,
    next_appointment: &str,
) -> String {
    format!(
        "Hello {}, Your checkup is done at {}. Total: {}, Paid: {}, Due: {}. Next Visit: {}.",
        patient_name,
        profile.clinic_name,
        format_amount(totals.grand_total),
        format_amount(amount_paid),
        format_amount(totals.new_due),
        next_appointment,
    )
}

/// `wa.me` link with the message text pre-filled. Spaces become `%20`;
/// the summary template contains no other characters needing escape.
pub fn whatsapp_link(contact: &str, country_code: &str, message: &str) -> String {
    let phone = normalize_phone(contact, country_code);
    format!("https://wa.me/{}?text={}", phone, message.replace(' ', "%20"))
}
