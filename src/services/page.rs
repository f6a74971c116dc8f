// src/services/page.rs
use crate::models::{CalculationMode, CalculatorInput, Locale};
use crate::services::report::{render_text, Outcome};

struct PageText {
    title: &'static str,
    investment: &'static str,
    buy_price: &'static str,
    broker_commission: &'static str,
    mode: &'static str,
    mode_current: &'static str,
    mode_target: &'static str,
    current_price: &'static str,
    target_profit: &'static str,
    calculate: &'static str,
    example: &'static str,
}

fn page_text(locale: Locale) -> PageText {
    match locale {
        Locale::Es => PageText {
            title: "Calculadora Bitcoin-USDT con Comisión",
            investment: "Inversión (USDT):",
            buy_price: "Precio de compra (USDT):",
            broker_commission: "Comisión del broker (%):",
            mode: "Tipo de cálculo:",
            mode_current: "Precio actual",
            mode_target: "Ganancia objetivo",
            current_price: "Precio actual (USDT):",
            target_profit: "Ganancia objetivo (%):",
            calculate: "Calcular",
            example: "Ej.",
        },
        Locale::En => PageText {
            title: "Bitcoin-USDT Calculator with Commission",
            investment: "Investment (USDT):",
            buy_price: "Buy price (USDT):",
            broker_commission: "Broker commission (%):",
            mode: "Calculation type:",
            mode_current: "Current price",
            mode_target: "Target profit",
            current_price: "Current price (USDT):",
            target_profit: "Target profit (%):",
            calculate: "Calculate",
            example: "e.g.",
        },
    }
}

// The optional field of the unchecked mode is hidden without any script.
const STYLE: &str = "\
body{font-family:sans-serif;background:#f3f4f6}\
main{max-width:28rem;margin:2rem auto;padding:1rem;background:#fff;border-radius:.75rem;box-shadow:0 1px 3px #0003}\
label.field{display:block;font-weight:bold;margin:.75rem 0 .25rem}\
input[type=number]{width:100%;padding:.5rem;box-sizing:border-box}\
button{margin-top:1rem;padding:.5rem 1rem;background:#3b82f6;color:#fff;font-weight:bold;border:0;border-radius:.25rem}\
#result{margin-top:1rem;padding:.75rem;background:#f3f4f6;border-radius:.25rem;white-space:pre-wrap}\
form:has(#mode-current:checked) .target-only{display:none}\
form:has(#mode-target:checked) .current-only{display:none}";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn number_field(id: &str, label: &str, value: &str, placeholder: &str, class: &str) -> String {
    format!(
        r#"<div class="{class}"><label class="field" for="{id}">{label}</label><input id="{id}" name="{id}" type="number" step="any" value="{value}" placeholder="{placeholder}"></div>"#,
        class = class,
        id = id,
        label = escape_html(label),
        value = escape_html(value),
        placeholder = escape_html(placeholder),
    )
}

fn mode_radio(mode: CalculationMode, label: &str, selected: CalculationMode) -> String {
    let checked = if mode == selected { " checked" } else { "" };
    format!(
        r#"<label><input type="radio" id="mode-{value}" name="mode" value="{value}"{checked}> {label}</label> "#,
        value = mode.as_str(),
        checked = checked,
        label = escape_html(label),
    )
}

fn output_panel(outcome: &Outcome) -> String {
    let body = match outcome {
        Outcome::Report(lines) => escape_html(&render_text(lines)),
        Outcome::Invalid(message) => escape_html(message),
    };
    let class = match outcome {
        Outcome::Report(_) => "report",
        Outcome::Invalid(_) => "invalid",
    };
    format!(r#"<pre id="result" class="{}">{}</pre>"#, class, body)
}

/// Renders the whole calculator page. `outcome` is `None` until the first calculation.
pub fn render_page(input: &CalculatorInput, outcome: Option<&Outcome>, locale: Locale) -> String {
    let text = page_text(locale);
    let example = |value: &str| format!("{} {}", text.example, value);

    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><style>{style}</style></head><body><main><h2>{title}</h2>"#,
        lang = locale.code(),
        title = escape_html(text.title),
        style = STYLE,
    ));
    html.push_str(&format!(r#"<form method="post" action="/?lang={}">"#, locale.code()));
    html.push_str(&number_field("investment", text.investment, &input.investment, &example("1000"), "always"));
    html.push_str(&number_field("buy_price", text.buy_price, &input.buy_price, &example("30000"), "always"));
    html.push_str(&number_field(
        "broker_commission",
        text.broker_commission,
        &input.broker_commission,
        &example("0.1"),
        "always",
    ));
    html.push_str(&format!(r#"<div><span class="field">{}</span><div>"#, escape_html(text.mode)));
    html.push_str(&mode_radio(CalculationMode::Current, text.mode_current, input.mode));
    html.push_str(&mode_radio(CalculationMode::Target, text.mode_target, input.mode));
    html.push_str("</div></div>");
    html.push_str(&number_field(
        "current_price",
        text.current_price,
        &input.current_price,
        &example("35000"),
        "current-only",
    ));
    html.push_str(&number_field(
        "target_profit",
        text.target_profit,
        &input.target_profit,
        &example("4"),
        "target-only",
    ));
    html.push_str(&format!(r#"<button type="submit">{}</button></form>"#, escape_html(text.calculate)));
    if let Some(outcome) = outcome {
        html.push_str(&output_panel(outcome));
    }
    html.push_str("</main></body></html>");
    html
}
