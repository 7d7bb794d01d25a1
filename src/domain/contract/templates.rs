//! Fixed texts: placeholders, the offline template and the failure record.

use chrono::NaiveDate;

use super::generated::{GeneratedContract, RiskItem, RiskLevel};
use super::language::Locale;
use super::request::ContractRequest;

/// Locale-specific placeholder texts.
#[derive(Debug)]
pub struct Messages {
    pub summary_unavailable: &'static str,
    pub risk_unavailable: &'static str,
    pub summary_not_found: &'static str,
    pub risk_not_found: &'static str,
    pub contract_unavailable: &'static str,
    pub unspecified: &'static str,
    pub no_address: &'static str,
}

const TURKISH: Messages = Messages {
    summary_unavailable: "Özet otomatik olarak üretilemedi.",
    risk_unavailable: "Risk analizi otomatik olarak üretilemedi.",
    summary_not_found: "Özet bulunamadı",
    risk_not_found: "Risk analizi yok",
    contract_unavailable: "Sözleşme metni üretilemedi.",
    unspecified: "Belirtilmemiş",
    no_address: "adres yok",
};

const ENGLISH: Messages = Messages {
    summary_unavailable: "The summary could not be generated automatically.",
    risk_unavailable: "The risk analysis could not be generated automatically.",
    summary_not_found: "Summary not found",
    risk_not_found: "No risk analysis provided",
    contract_unavailable: "The contract text could not be generated.",
    unspecified: "Not specified",
    no_address: "no address",
};

pub fn messages(locale: Locale) -> &'static Messages {
    match locale {
        Locale::Turkish => &TURKISH,
        Locale::English => &ENGLISH,
    }
}

/// Formats a date the way each locale writes it.
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Turkish => date.format("%d.%m.%Y").to_string(),
        Locale::English => date.format("%B %-d, %Y").to_string(),
    }
}

/// Builds a draft purely from the request fields.
///
/// Used when no AI credential is configured.
pub fn offline_template(request: &ContractRequest, locale: Locale) -> GeneratedContract {
    let parties = if request.parties.is_empty() {
        match locale {
            Locale::Turkish => "Taraf belirtilmemiştir.".to_string(),
            Locale::English => "No parties specified.".to_string(),
        }
    } else {
        request
            .parties
            .iter()
            .map(|p| {
                let address = if p.address.trim().is_empty() {
                    messages(locale).no_address
                } else {
                    p.address.as_str()
                };
                format!("**{}:** {}", p.name, address)
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let deadline = request.deadline.map(|d| format_date(d, locale));
    let party_count = request.parties.len();

    match locale {
        Locale::Turkish => GeneratedContract {
            contract: format!(
                "# SÖZLEŞME TASLAĞI\n\n## TARAFLAR\n{parties}\n\n## PROJE KAPSAMI\n{scope}\n\n\
                 ## ÖDEME KOŞULLARI\n- Para birimi: {currency}\n- Ülke: {country}\n\n\
                 ## TESLİM TARİHİ\n{deadline}\n\n## FESİH KOŞULLARI\n{termination}",
                parties = parties,
                scope = request.description.trim(),
                currency = request.currency,
                country = request.country,
                deadline = deadline
                    .map(|d| format!("Proje {} tarihine kadar tamamlanacaktır.", d))
                    .unwrap_or_else(|| "Teslim tarihi belirtilmemiştir.".to_string()),
                termination = request
                    .termination_notice_days
                    .map(|n| format!(
                        "Her iki taraf da {} gün önceden yazılı bildirimde bulunarak sözleşmeyi feshedebilir.",
                        n
                    ))
                    .unwrap_or_else(|| "Fesih koşulları belirtilmemiştir.".to_string()),
            ),
            summary: vec![
                "Çevrimdışı şablondan oluşturulan sözleşme".to_string(),
                format!("Para birimi: {}", request.currency),
                format!("Ülke: {}", request.country),
                format!("{} taraf dahil", party_count),
            ],
            risk_analysis: vec![RiskItem::new(
                RiskLevel::Low,
                "Geliştirme ortamında simüle edildi",
            )],
        },
        Locale::English => GeneratedContract {
            contract: format!(
                "# CONTRACT DRAFT\n\n## PARTIES\n{parties}\n\n## SCOPE\n{scope}\n\n\
                 ## PAYMENT TERMS\n- Currency: {currency}\n- Country: {country}\n\n\
                 ## DELIVERY DATE\n{deadline}\n\n## TERMINATION\n{termination}",
                parties = parties,
                scope = request.description.trim(),
                currency = request.currency,
                country = request.country,
                deadline = deadline
                    .map(|d| format!("The project shall be completed by {}.", d))
                    .unwrap_or_else(|| "No delivery date specified.".to_string()),
                termination = request
                    .termination_notice_days
                    .map(|n| format!(
                        "Either party may terminate this agreement with {} days' written notice.",
                        n
                    ))
                    .unwrap_or_else(|| "No termination terms specified.".to_string()),
            ),
            summary: vec![
                "Contract built from the offline template".to_string(),
                format!("Currency: {}", request.currency),
                format!("Country: {}", request.country),
                format!("{} parties involved", party_count),
            ],
            risk_analysis: vec![RiskItem::new(
                RiskLevel::Low,
                "Simulated in a development environment",
            )],
        },
    }
}

/// Record returned when the AI call itself fails.
pub fn upstream_failure(detail: &str, locale: Locale) -> GeneratedContract {
    match locale {
        Locale::Turkish => GeneratedContract {
            contract: format!(
                "# UYARI: Otomatik sözleşme oluşturulamadı\n\n\
                 Sistem bir hata ile karşılaştı; lütfen daha sonra tekrar deneyin.\n\n(Hata: {})",
                detail
            ),
            summary: vec!["Sistemsel hata nedeniyle sözleşme oluşturulamadı.".to_string()],
            risk_analysis: vec![RiskItem::new(
                RiskLevel::High,
                "AI çağrısı sırasında hata oluştu.",
            )],
        },
        Locale::English => GeneratedContract {
            contract: format!(
                "# WARNING: The contract could not be generated automatically\n\n\
                 The system encountered an error; please try again later.\n\n(Error: {})",
                detail
            ),
            summary: vec!["The contract could not be generated because of a system error.".to_string()],
            risk_analysis: vec![RiskItem::new(
                RiskLevel::High,
                "An error occurred while calling the AI service.",
            )],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contract::request::{Currency, Party};

    fn sample_request() -> ContractRequest {
        ContractRequest::new("Web sitesi geliştirme")
            .with_party(Party::new("Ayşe Yılmaz", "İstanbul"))
            .with_party(Party::new("Acme Ltd", ""))
            .with_country("Türkiye")
            .with_currency(Currency::Usd)
            .with_deadline(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .with_termination_notice_days(15)
    }

    #[test]
    fn offline_template_mentions_every_field() {
        let record = offline_template(&sample_request(), Locale::Turkish);

        assert!(record.contract.contains("**Ayşe Yılmaz:** İstanbul"));
        assert!(record.contract.contains("**Acme Ltd:** adres yok"));
        assert!(record.contract.contains("Para birimi: USD"));
        assert!(record.contract.contains("Ülke: Türkiye"));
        assert!(record.contract.contains("01.03.2025"));
        assert!(record.contract.contains("15 gün"));
        assert_eq!(record.summary[3], "2 taraf dahil");
        assert_eq!(record.risk_analysis[0].level, RiskLevel::Low);
        assert!(record.is_well_formed());
    }

    #[test]
    fn offline_template_handles_missing_optionals() {
        let request = ContractRequest::new("Logo");
        let record = offline_template(&request, Locale::Turkish);

        assert!(record.contract.contains("Teslim tarihi belirtilmemiştir."));
        assert!(record.contract.contains("Fesih koşulları belirtilmemiştir."));
        assert!(record.contract.contains("Taraf belirtilmemiştir."));
    }

    #[test]
    fn offline_template_in_english() {
        let record = offline_template(&sample_request(), Locale::English);

        assert!(record.contract.starts_with("# CONTRACT DRAFT"));
        assert!(record.contract.contains("March 1, 2025"));
        assert!(record.contract.contains("15 days' written notice"));
        assert_eq!(record.summary[1], "Currency: USD");
    }

    #[test]
    fn upstream_failure_is_high_risk_and_embeds_detail() {
        let record = upstream_failure("network error: connection refused", Locale::Turkish);

        assert!(record.contract.contains("UYARI"));
        assert!(record.contract.contains("connection refused"));
        assert_eq!(record.risk_analysis[0].level, RiskLevel::High);
        assert!(record.is_well_formed());
    }

    #[test]
    fn date_formats_per_locale() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        assert_eq!(format_date(date, Locale::Turkish), "09.12.2024");
        assert_eq!(format_date(date, Locale::English), "December 9, 2024");
    }
}
