// src/services/report.rs
use serde::Serialize;

use crate::models::{
    CalculationReport, CurrentReport, InputField, InvalidNumericInput, Locale, Purchase, TargetReport,
};

pub const CRYPTO_UNIT: &str = "BTC";
pub const QUOTE_UNIT: &str = "USDT";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    fn new(label: &str, value: String) -> Self {
        ReportLine {
            label: label.to_string(),
            value,
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// What the output panel shows after a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Report(Vec<ReportLine>),
    Invalid(String),
}

impl Outcome {
    pub fn from_result(result: &Result<CalculationReport, InvalidNumericInput>, locale: Locale) -> Self {
        match result {
            Ok(report) => Outcome::Report(report_lines(report, locale)),
            Err(error) => Outcome::Invalid(validation_message(error, locale)),
        }
    }
}

// Extra digits printed to tell an exact half from a value merely close to one.
const TIE_DIGITS: usize = 25;

/// Fixed-point formatting; non-finite values keep a readable spelling instead of `inf`.
/// Exact halves round away from zero (`0.125` gives `0.13`), other values to nearest.
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    } else if value == f64::INFINITY {
        return "Infinity".to_string();
    } else if value == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }

    // -0.0 prints as 0
    let value = if value == 0.0 { 0.0 } else { value };
    let expanded = format!("{:.*}", decimals + TIE_DIGITS, value);
    let (kept, tail) = expanded.split_at(expanded.len() - TIE_DIGITS);
    if tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0') {
        increment_last_digit(kept.trim_end_matches('.'))
    } else {
        format!("{:.*}", decimals, value)
    }
}

// Adds one unit in the last place of a plain decimal string, away from zero.
fn increment_last_digit(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                carry = false;
                break;
            }
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    format!("{}{}", sign, String::from_utf8_lossy(&bytes))
}

fn crypto(value: f64) -> String {
    format!("{} {}", fixed(value, 8), CRYPTO_UNIT)
}

fn money(value: f64) -> String {
    format!("${} {}", fixed(value, 2), QUOTE_UNIT)
}

fn money_with_percent(value: f64, percent: f64) -> String {
    format!("{} ({}%)", money(value), fixed(percent, 2))
}

struct Labels {
    bitcoin_amount: &'static str,
    effective_investment: &'static str,
    buy_commission: &'static str,
    current_value_gross: &'static str,
    current_sell_commission: &'static str,
    current_value_net: &'static str,
    profit: &'static str,
    target_sell_price: &'static str,
    gross_required: &'static str,
    target_sell_commission: &'static str,
    total_required_net: &'static str,
    required_profit: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::Es => Labels {
            bitcoin_amount: "Cantidad de Bitcoin",
            effective_investment: "Inversión efectiva",
            buy_commission: "Comisión de compra",
            current_value_gross: "Valor actual bruto",
            current_sell_commission: "Comisión de venta",
            current_value_net: "Valor actual neto",
            profit: "Ganancia/Pérdida neta",
            target_sell_price: "Precio de venta objetivo",
            gross_required: "Valor bruto objetivo",
            target_sell_commission: "Comisión de venta estimada",
            total_required_net: "Valor neto objetivo",
            required_profit: "Ganancia neta proyectada",
        },
        Locale::En => Labels {
            bitcoin_amount: "Bitcoin amount",
            effective_investment: "Effective investment",
            buy_commission: "Buy commission",
            current_value_gross: "Current gross value",
            current_sell_commission: "Sell commission",
            current_value_net: "Current net value",
            profit: "Net profit/loss",
            target_sell_price: "Target sell price",
            gross_required: "Target gross value",
            target_sell_commission: "Estimated sell commission",
            total_required_net: "Target net value",
            required_profit: "Projected net profit",
        },
    }
}

fn purchase_lines(labels: &Labels, purchase: &Purchase) -> Vec<ReportLine> {
    vec![
        ReportLine::new(labels.bitcoin_amount, crypto(purchase.bitcoin_amount)),
        ReportLine::new(labels.effective_investment, money(purchase.effective_investment)),
        ReportLine::new(labels.buy_commission, money(purchase.buy_commission)),
    ]
}

fn current_lines(labels: &Labels, report: &CurrentReport) -> Vec<ReportLine> {
    let mut lines = purchase_lines(labels, &report.purchase);
    lines.extend([
        ReportLine::new(labels.current_value_gross, money(report.current_value_gross)),
        ReportLine::new(labels.current_sell_commission, money(report.sell_commission)),
        ReportLine::new(labels.current_value_net, money(report.current_value_net)),
        ReportLine::new(labels.profit, money_with_percent(report.profit, report.profit_percent)),
    ]);
    lines
}

fn target_lines(labels: &Labels, report: &TargetReport) -> Vec<ReportLine> {
    let mut lines = purchase_lines(labels, &report.purchase);
    lines.extend([
        ReportLine::new(labels.target_sell_price, money(report.target_sell_price)),
        ReportLine::new(labels.gross_required, money(report.gross_required)),
        ReportLine::new(labels.target_sell_commission, money(report.sell_commission)),
        ReportLine::new(labels.total_required_net, money(report.total_required_net)),
        ReportLine::new(
            labels.required_profit,
            money_with_percent(report.required_profit, report.target_profit_percent),
        ),
    ]);
    lines
}

pub fn report_lines(report: &CalculationReport, locale: Locale) -> Vec<ReportLine> {
    let labels = labels(locale);
    match report {
        CalculationReport::Current(report) => current_lines(&labels, report),
        CalculationReport::Target(report) => target_lines(&labels, report),
    }
}

pub fn render_text(lines: &[ReportLine]) -> String {
    lines.iter().map(ReportLine::text).collect::<Vec<_>>().join("\n")
}

pub fn validation_message(error: &InvalidNumericInput, locale: Locale) -> String {
    let message = match (error.fields.as_slice(), locale) {
        ([InputField::CurrentPrice], Locale::Es) => {
            "Por favor, ingrese un valor numérico válido para el precio actual."
        }
        ([InputField::CurrentPrice], Locale::En) => "Please enter a valid numeric value for the current price.",
        ([InputField::TargetProfit], Locale::Es) => {
            "Por favor, ingrese un valor numérico válido para el porcentaje de ganancia objetivo."
        }
        ([InputField::TargetProfit], Locale::En) => {
            "Please enter a valid numeric value for the target profit percentage."
        }
        (_, Locale::Es) => {
            "Por favor, ingrese valores numéricos válidos para la inversión, precio de compra y comisión del broker."
        }
        (_, Locale::En) => {
            "Please enter valid numeric values for the investment, buy price and broker commission."
        }
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calculator::{current_report, purchase, target_report};

    #[test]
    fn fixed_spells_out_non_finite_values() {
        assert_eq!(fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(fixed(f64::NEG_INFINITY, 2), "-Infinity");
        assert_eq!(fixed(f64::NAN, 8), "NaN");
        assert_eq!(fixed(-12.5, 2), "-12.50");
        assert_eq!(fixed(0.0333, 8), "0.03330000");
    }

    #[test]
    fn fixed_rounds_exact_halves_away_from_zero() {
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(-0.125, 2), "-0.13");
        assert_eq!(fixed(1000.125, 2), "1000.13");
        assert_eq!(fixed(9.995, 2), "9.99"); // 9.995 is stored just below the half
        assert_eq!(fixed(99.875, 2), "99.88");
        assert_eq!(fixed(9.5, 0), "10");
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(0.124, 2), "0.12");
    }

    #[test]
    fn half_cent_investment_rounds_up_in_report() {
        let report = CalculationReport::Current(current_report(1000.125, purchase(1000.125, 1000.125, 0.0), 1000.125));
        let lines = report_lines(&report, Locale::En);
        assert_eq!(lines[1].value, "$1000.13 USDT");
    }

    #[test]
    fn current_report_lines_in_order() {
        let report = CalculationReport::Current(current_report(1000.0, purchase(1000.0, 32000.0, 0.0), 40000.0));
        let text = render_text(&report_lines(&report, Locale::En));
        assert_eq!(
            text,
            "Bitcoin amount: 0.03125000 BTC\n\
             Effective investment: $1000.00 USDT\n\
             Buy commission: $0.00 USDT\n\
             Current gross value: $1250.00 USDT\n\
             Sell commission: $0.00 USDT\n\
             Current net value: $1250.00 USDT\n\
             Net profit/loss: $250.00 USDT (25.00%)"
        );
    }

    #[test]
    fn target_report_lines_in_order() {
        let report = CalculationReport::Target(target_report(1000.0, purchase(1000.0, 30000.0, 0.1), 4.0));
        let lines = report_lines(&report, Locale::Es);
        let labels: Vec<&str> = lines.iter().map(|line| line.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Cantidad de Bitcoin",
                "Inversión efectiva",
                "Comisión de compra",
                "Precio de venta objetivo",
                "Valor bruto objetivo",
                "Comisión de venta estimada",
                "Valor neto objetivo",
                "Ganancia neta proyectada",
            ]
        );
        assert_eq!(lines[0].value, "0.03330000 BTC");
        assert_eq!(lines[1].value, "$999.00 USDT");
        assert_eq!(lines[2].value, "$1.00 USDT");
        assert_eq!(lines[3].value, "$31292.55 USDT");
        assert_eq!(lines[4].value, "$1042.04 USDT");
        assert_eq!(lines[5].value, "$1.04 USDT");
        assert_eq!(lines[6].value, "$1041.00 USDT");
        assert_eq!(lines[7].value, "$40.00 USDT (4.00%)");
    }

    #[test]
    fn negative_profit_is_shown() {
        let report = CalculationReport::Current(current_report(1000.0, purchase(1000.0, 32000.0, 0.0), 16000.0));
        let lines = report_lines(&report, Locale::En);
        assert_eq!(lines[6].value, "$-500.00 USDT (-50.00%)");
    }

    #[test]
    fn messages_name_the_failing_scope() {
        let required = validation_message(&InvalidNumericInput::required_fields(), Locale::Es);
        assert!(required.contains("inversión, precio de compra y comisión del broker"));

        let current = validation_message(&InvalidNumericInput::field(InputField::CurrentPrice), Locale::En);
        assert!(current.contains("current price"));

        let target = validation_message(&InvalidNumericInput::field(InputField::TargetProfit), Locale::Es);
        assert!(target.contains("ganancia objetivo"));
    }
}
