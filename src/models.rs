// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which report the calculator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    #[default]
    Current,
    Target,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Current => "current",
            CalculationMode::Target => "target",
        }
    }
}

/// Raw form state as typed by the user. Nothing is parsed until a calculation runs,
/// and both optional fields are kept so toggling the mode never loses a value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CalculatorInput {
    #[serde(default, deserialize_with = "text_or_number")]
    pub investment: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub buy_price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub broker_commission: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub current_price: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub target_profit: String,
    #[serde(default)]
    pub mode: CalculationMode,
}

// Form bodies always carry text, JSON clients may send bare numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
        TextOrNumber::Null(()) => String::new(),
    })
}

/// The mode-specific input, present only for the mode it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeInput {
    Current { current_price: f64 },
    Target { target_profit_percent: f64 },
}

/// Input whose every required field parsed to a finite number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
    pub investment_amount: f64,
    pub buy_price: f64,
    pub broker_commission_percent: f64,
    pub mode: ModeInput,
}

/// Buy leg shared by both reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Purchase {
    pub commission_rate: f64,
    pub buy_commission: f64,
    pub effective_investment: f64,
    pub bitcoin_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrentReport {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub current_value_gross: f64,
    pub sell_commission: f64,
    pub current_value_net: f64,
    pub profit: f64,
    pub profit_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetReport {
    #[serde(flatten)]
    pub purchase: Purchase,
    pub target_profit_percent: f64,
    pub required_profit: f64,
    pub total_required_net: f64,
    pub gross_required: f64,
    pub target_sell_price: f64,
    pub sell_commission: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CalculationReport {
    Current(CurrentReport),
    Target(TargetReport),
}

impl CalculationReport {
    pub fn purchase(&self) -> &Purchase {
        match self {
            CalculationReport::Current(report) => &report.purchase,
            CalculationReport::Target(report) => &report.purchase,
        }
    }

    pub fn mode(&self) -> CalculationMode {
        match self {
            CalculationReport::Current(_) => CalculationMode::Current,
            CalculationReport::Target(_) => CalculationMode::Target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Investment,
    BuyPrice,
    BrokerCommission,
    CurrentPrice,
    TargetProfit,
}

impl InputField {
    /// The fields every calculation needs regardless of mode.
    pub const REQUIRED: [InputField; 3] = [
        InputField::Investment,
        InputField::BuyPrice,
        InputField::BrokerCommission,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputField::Investment => "investment",
            InputField::BuyPrice => "buy_price",
            InputField::BrokerCommission => "broker_commission",
            InputField::CurrentPrice => "current_price",
            InputField::TargetProfit => "target_profit",
        }
    }
}

/// A required field did not parse to a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidNumericInput {
    pub fields: Vec<InputField>,
}

impl InvalidNumericInput {
    pub fn required_fields() -> Self {
        InvalidNumericInput {
            fields: InputField::REQUIRED.to_vec(),
        }
    }

    pub fn field(field: InputField) -> Self {
        InvalidNumericInput { fields: vec![field] }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(InputField::name).collect()
    }
}

impl fmt::Display for InvalidNumericInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid numeric input: {}", self.field_names().join(", "))
    }
}

impl std::error::Error for InvalidNumericInput {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Picks the supported primary tag with the highest `q` weight from an
    /// `Accept-Language` header; on equal weights the earlier entry wins and `q=0` is skipped.
    /// e.g. `es;q=0.1, en-US;q=0.9` gives `En`.
    pub fn from_accept_language(header: &str) -> Option<Locale> {
        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let locale = match parts
                .next()
                .and_then(|tag| tag.trim().split('-').next())
                .and_then(|primary| primary.parse::<Locale>().ok())
            {
                Some(locale) => locale,
                None => continue,
            };
            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if quality <= 0.0 {
                continue;
            }
            if best.map_or(true, |(_, best_quality)| quality > best_quality) {
                best = Some((locale, quality));
            }
        }
        best.map(|(locale, _)| locale)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}
