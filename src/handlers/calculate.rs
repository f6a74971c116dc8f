// src/handlers/calculate.rs
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::locale::{resolve_locale, LangQuery};
use crate::config::Settings;
use crate::models::{CalculationMode, CalculationReport, CalculatorInput};
use crate::services::calculator;
use crate::services::report::{report_lines, validation_message, ReportLine};

#[derive(Serialize)]
struct CalculationResponse {
    mode: CalculationMode,
    report: CalculationReport,
    lines: Vec<ReportLine>,
}

pub async fn post_calculate(
    query: LangQuery,
    accept_language: Option<String>,
    settings: Arc<Settings>,
    input: CalculatorInput,
) -> Result<Json, Rejection> {
    info!("Handling request to calculate {} report", input.mode.as_str());
    let locale = resolve_locale(&query, accept_language.as_deref(), &settings);

    let report = calculator::run(&input).map_err(|e| {
        warn!("Rejecting calculation: {}", e);
        warp::reject::custom(ApiError::invalid_input(validation_message(&e, locale), e.field_names()))
    })?;

    let response = CalculationResponse {
        mode: report.mode(),
        lines: report_lines(&report, locale),
        report,
    };
    Ok(warp::reply::json(&response))
}
