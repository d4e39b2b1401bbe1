//! Donation records written by the payment integration, and the chapel
//! settings shown around the donation flow.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_THANKS_MESSAGE: &str = "Muito obrigado pela sua generosidade! Sua doação será fundamental para a preservação da Capela São Miguel.";
pub const DEFAULT_CHAPEL_PHONE: &str = "(11) 2032-4160";
pub const DEFAULT_CHAPEL_WHATSAPP: &str = "11999999999";
pub const DEFAULT_CHAPEL_EMAIL: &str = "doacoes@catedralsaomiguel.com.br";

/// Setting keys in `system_settings`.
pub mod setting_keys {
    pub const THANKS_MESSAGE: &str = "capela_donation_thanks_message";
    pub const PHONE: &str = "capela_phone";
    pub const WHATSAPP: &str = "capela_whatsapp";
    pub const EMAIL: &str = "capela_email";
}

/// A completed (or pending) donation, looked up by the payment session id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: String,
    pub status: String,
}

impl Donation {
    /// Plain-text receipt offered for download on the success page.
    pub fn receipt(&self) -> String {
        let mut lines = vec![
            "COMPROVANTE DE DOAÇÃO".to_string(),
            "Capela São Miguel Arcanjo".to_string(),
            String::new(),
            format!("Data: {}", format_date(&self.created_at)),
            format!("Valor: {}", format_currency(self.amount, &self.currency)),
        ];
        if let Some(name) = &self.donor_name {
            lines.push(format!("Doador: {}", name));
        }
        if let Some(purpose) = &self.donation_purpose {
            lines.push(format!("Finalidade: {}", purpose));
        }
        if let Some(message) = &self.message {
            lines.push(format!("Mensagem: {}", message));
        }
        lines.push(String::new());
        lines.push(format!("ID da Transação: {}", self.id));
        lines.push(format!("Status: {}", self.status));
        lines.push(String::new());
        lines.push("Obrigado pela sua generosidade!".to_string());

        let mut receipt = lines.join("\n");
        receipt.push('\n');
        receipt
    }
}

/// Thanks message and chapel contact, with defaults filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DonationSettings {
    pub thanks_message: String,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
}

impl Default for DonationSettings {
    fn default() -> Self {
        Self {
            thanks_message: DEFAULT_THANKS_MESSAGE.to_string(),
            phone: DEFAULT_CHAPEL_PHONE.to_string(),
            whatsapp: DEFAULT_CHAPEL_WHATSAPP.to_string(),
            email: DEFAULT_CHAPEL_EMAIL.to_string(),
        }
    }
}

impl DonationSettings {
    /// Overlay stored `(key, value)` pairs onto the defaults.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            if value.trim().is_empty() {
                continue;
            }
            match key.as_str() {
                setting_keys::THANKS_MESSAGE => settings.thanks_message = value,
                setting_keys::PHONE => settings.phone = value,
                setting_keys::WHATSAPP => settings.whatsapp = value,
                setting_keys::EMAIL => settings.email = value,
                _ => {}
            }
        }
        settings
    }
}

/// Format an amount the way the pt-BR locale does (`R$ 1.234,56`).
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.to_uppercase();
    let symbol = match code.as_str() {
        "BRL" => "R$",
        "USD" => "US$",
        "EUR" => "€",
        _ => code.as_str(),
    };

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{} {},{:02}", sign, symbol, grouped, fraction)
}

/// Render a stored timestamp as `dd/mm/yyyy`; unparseable values pass
/// through unchanged.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation() -> Donation {
        Donation {
            id: "don-1".to_string(),
            amount: 1234.5,
            currency: "brl".to_string(),
            donor_name: Some("Maria".to_string()),
            donor_email: None,
            donation_purpose: None,
            message: Some("Que Deus abençoe".to_string()),
            created_at: "2024-09-29T15:30:00Z".to_string(),
            status: "completed".to_string(),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(50.0, "brl"), "R$ 50,00");
        assert_eq!(format_currency(1234.5, "BRL"), "R$ 1.234,50");
        assert_eq!(format_currency(1_000_000.0, "usd"), "US$ 1.000.000,00");
        assert_eq!(format_currency(0.1, "gbp"), "GBP 0,10");
        assert_eq!(format_currency(-5.0, "brl"), "-R$ 5,00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-09-29T15:30:00Z"), "29/09/2024");
        assert_eq!(format_date("2024-01-02 08:00:00"), "02/01/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_receipt_contents() {
        let receipt = donation().receipt();
        assert!(receipt.starts_with("COMPROVANTE DE DOAÇÃO\n"));
        assert!(receipt.contains("Data: 29/09/2024"));
        assert!(receipt.contains("Valor: R$ 1.234,50"));
        assert!(receipt.contains("Doador: Maria"));
        assert!(receipt.contains("Mensagem: Que Deus abençoe"));
        assert!(!receipt.contains("Finalidade"));
        assert!(receipt.contains("ID da Transação: don-1"));
    }

    #[test]
    fn test_settings_from_pairs() {
        let settings = DonationSettings::from_pairs(vec![
            (setting_keys::PHONE.to_string(), "(11) 5555-0000".to_string()),
            (setting_keys::EMAIL.to_string(), "  ".to_string()),
            ("unrelated".to_string(), "x".to_string()),
        ]);
        assert_eq!(settings.phone, "(11) 5555-0000");
        assert_eq!(settings.email, DEFAULT_CHAPEL_EMAIL);
        assert_eq!(settings.thanks_message, DEFAULT_THANKS_MESSAGE);
    }
}
