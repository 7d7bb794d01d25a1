//! Drafting instruction sent to the AI provider.

use super::language::Locale;
use super::request::ContractRequest;
use super::templates::{format_date, messages};

/// Builds the drafting prompt for a request.
///
/// The instruction asks for a bare JSON object first and falls back to
/// sectioned markdown that the plain-text parser understands.
pub fn compose_prompt(request: &ContractRequest, locale: Locale) -> String {
    let text = messages(locale);
    let language = locale.native_name();

    let parties = request
        .parties
        .iter()
        .map(|p| {
            let address = if p.address.trim().is_empty() {
                text.no_address
            } else {
                p.address.trim()
            };
            format!("{} ({})", p.name.trim(), address)
        })
        .collect::<Vec<_>>()
        .join("; ");

    let deadline = request
        .deadline
        .map(|d| format_date(d, locale))
        .unwrap_or_default();

    let termination = request
        .termination_notice_days
        .map(|n| n.to_string())
        .unwrap_or_else(|| text.unspecified.to_string());

    format!(
        r#"You are a professional legal-drafting assistant. Respond in {language}.
User-supplied details below (do not invent missing legal identifiers).
Description: {description}
Parties: {parties}
Country: {country}
Currency: {currency}
Deadline: {deadline}
Termination (days): {termination}

OUTPUT INSTRUCTION (priority order):
1) Preferably return a valid JSON object ONLY (no code fences, no extra text) with keys:
   {{
     "contract": "<full contract as markdown or plain text>",
     "summary": ["bullet1","bullet2",...],
     "riskAnalysis": [{{"level":"High|Medium|Low","description":"..."}}]
   }}
   If you return JSON, ensure strings are not escaped JSON-within-JSON (return real JSON).

2) If you cannot return JSON, return CLEAN markdown in {language} with the following headings:
   # <TITLE>
   ## TARAFLAR (or PARTIES)
   ## PROJE KAPSAMI (or SCOPE)
   ## ÖDEME KOŞULLARI (or PAYMENT TERMS)
   ## TESLİM TARİHİ (or DELIVERY DATE)
   ## FİKRİ MÜLKİYET (or IP)
   ## FESİH KOŞULLARI (or TERMINATION)
   Then append:
   ## ÖZET (or SUMMARY) - 3 to 6 bullet points
   ## RISK ANALIZI (or RISK ANALYSIS) - up to 3 items like "High: reason"

IMPORTANT:
- If the user prompt is in Turkish, produce the contract and headings in Turkish. If in English, produce in English.
- Do not wrap the JSON in markdown code blocks. Do not output anything other than the JSON object if you can.
- If you cannot produce JSON, produce only the clean markdown described above.
"#,
        language = language,
        description = request.description.trim(),
        parties = parties,
        country = request.country.trim(),
        currency = request.currency.code(),
        deadline = deadline,
        termination = termination,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::request::{Currency, Party};
    use chrono::NaiveDate;

    #[test]
    fn prompt_carries_request_fields() {
        let request = ContractRequest::new("Logo tasarımı")
            .with_party(Party::new("Ayşe", "Ankara"))
            .with_party(Party::new("Mehmet", " "))
            .with_country("Türkiye")
            .with_currency(Currency::Eur)
            .with_deadline(NaiveDate::from_ymd_opt(2025, 1, 9).unwrap())
            .with_termination_notice_days(30);

        let prompt = compose_prompt(&request, Locale::Turkish);

        assert!(prompt.contains("Respond in Türkçe."));
        assert!(prompt.contains("Description: Logo tasarımı"));
        assert!(prompt.contains("Parties: Ayşe (Ankara); Mehmet (adres yok)"));
        assert!(prompt.contains("Country: Türkiye"));
        assert!(prompt.contains("Currency: EUR"));
        assert!(prompt.contains("Deadline: 09.01.2025"));
        assert!(prompt.contains("Termination (days): 30"));
    }

    #[test]
    fn english_prompt_uses_english_placeholders() {
        let prompt = compose_prompt(&ContractRequest::new("Build a website"), Locale::English);

        assert!(prompt.contains("Respond in English."));
        assert!(prompt.contains("Termination (days): Not specified"));
        assert!(prompt.contains(r#""riskAnalysis": [{"level":"High|Medium|Low""#));
    }
}
