// src/routes.rs
use std::convert::Infallible;
use std::sync::Arc;

use log::{debug, info};
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, Rejection, UnsupportedMediaType};
use warp::{Filter, Reply};

use crate::config::Settings;
use crate::handlers::calculate::post_calculate;
use crate::handlers::error::ApiError;
use crate::handlers::locale::LangQuery;
use crate::handlers::page::{get_form, submit_form};
use crate::models::CalculatorInput;

const MAX_BODY_BYTES: u64 = 16 * 1024;

// Add recovery handling for our custom errors
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let error = if err.is_not_found() {
        ApiError {
            status: StatusCode::NOT_FOUND,
            ..ApiError::new("Not Found")
        }
    } else if let Some(api_error) = err.find::<ApiError>() {
        api_error.clone()
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        ApiError::bad_request(e.to_string())
    } else if err.find::<LengthRequired>().is_some() {
        ApiError {
            status: StatusCode::LENGTH_REQUIRED,
            ..ApiError::new("Length Required")
        }
    } else if err.find::<PayloadTooLarge>().is_some() {
        ApiError {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            ..ApiError::new("Payload Too Large")
        }
    } else if err.find::<UnsupportedMediaType>().is_some() {
        ApiError {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ..ApiError::new("Unsupported Media Type")
        }
    } else if err.find::<MethodNotAllowed>().is_some() {
        ApiError {
            status: StatusCode::METHOD_NOT_ALLOWED,
            ..ApiError::new("Method Not Allowed")
        }
    } else {
        debug!("Unhandled rejection: {:?}", err);
        ApiError::new("Internal Server Error")
    };

    let body = if error.fields.is_empty() {
        serde_json::json!({ "error": error.message })
    } else {
        serde_json::json!({ "error": error.message, "fields": error.fields })
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), error.status))
}

pub fn routes(settings: Arc<Settings>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let settings_filter = warp::any().map(move || settings.clone());
    let locale_inputs = warp::query::<LangQuery>()
        .and(warp::header::optional::<String>("accept-language"))
        .and(settings_filter);

    let form_route = warp::path::end()
        .and(warp::get())
        .and(locale_inputs.clone())
        .and_then(get_form);

    let submit_route = warp::path::end()
        .and(warp::post())
        .and(locale_inputs.clone())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form::<CalculatorInput>())
        .and_then(submit_form);

    let calculate_route = warp::path!("api" / "v1" / "calculate")
        .and(warp::post())
        .and(locale_inputs)
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CalculatorInput>())
        .and_then(post_calculate);

    info!("All routes configured successfully.");

    form_route
        .or(submit_route)
        .or(calculate_route)
        .recover(handle_rejection)
}
