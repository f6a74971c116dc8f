// src/handlers/page.rs
use log::{debug, info};
use std::sync::Arc;
use warp::reply::Html;
use warp::Rejection;

use super::locale::{resolve_locale, LangQuery};
use crate::config::Settings;
use crate::models::CalculatorInput;
use crate::services::calculator;
use crate::services::page::render_page;
use crate::services::report::Outcome;

pub async fn get_form(
    query: LangQuery,
    accept_language: Option<String>,
    settings: Arc<Settings>,
) -> Result<Html<String>, Rejection> {
    let locale = resolve_locale(&query, accept_language.as_deref(), &settings);
    debug!("Rendering empty calculator form ({})", locale.code());
    Ok(warp::reply::html(render_page(&CalculatorInput::default(), None, locale)))
}

/// Handles the Calculate button: the page comes back with the same values and the
/// output panel filled, whether the calculation succeeded or not.
pub async fn submit_form(
    query: LangQuery,
    accept_language: Option<String>,
    settings: Arc<Settings>,
    input: CalculatorInput,
) -> Result<Html<String>, Rejection> {
    let locale = resolve_locale(&query, accept_language.as_deref(), &settings);
    let result = calculator::run(&input);
    match &result {
        Ok(report) => info!(
            "Calculated {} report from form ({} BTC bought)",
            report.mode().as_str(),
            report.purchase().bitcoin_amount
        ),
        Err(e) => info!("Form rejected: {}", e),
    }
    let outcome = Outcome::from_result(&result, locale);
    Ok(warp::reply::html(render_page(&input, Some(&outcome), locale)))
}
