use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{FetchError, MetarDecodeError};
use crate::formatters::{format_temperature, summarize, NOT_AVAILABLE};
use crate::models::{AppState, ErrorResponse, ParsedReport, WeatherResponse};
use crate::parser::decode;

// serves the home page with the search form
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

// anything that isn't a known route
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Page not found".to_string())
}

pub enum ApiError {
    Fetch(FetchError),
    Decode(MetarDecodeError),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::Fetch(err)
    }
}

impl From<MetarDecodeError> for ApiError {
    fn from(err: MetarDecodeError) -> Self {
        ApiError::Decode(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            ApiError::Fetch(err) => err.to_string(),
            ApiError::Decode(err) => format!("Unable to parse METAR data: {}", err),
        };
        error_response(StatusCode::BAD_REQUEST, message)
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

// fetches, decodes and summarizes the latest report for an airport
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(icao): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let icao = icao.trim().to_uppercase();

    let raw = state.source.fetch(&icao).await.inspect_err(|e| {
        warn!(station = %icao, error = %e, "could not fetch METAR");
    })?;

    let report = decode(&raw).inspect_err(|e| {
        warn!(station = %icao, error = %e, raw = %raw, "could not decode METAR");
    })?;

    info!(station = %report.station, "served weather report");

    Ok(Json(build_response(icao, raw, report, Utc::now())))
}

// assembles the json body, the display strings are what the page shows next to each label
pub fn build_response(
    icao: String,
    raw: String,
    report: ParsedReport,
    now: DateTime<Utc>,
) -> WeatherResponse {
    let mut data = BTreeMap::new();
    data.insert("Location", report.station.clone());
    data.insert("Time", format_time_display(&report, now));
    data.insert("Weather Conditions", format_conditions_display(&report));
    data.insert("Temperature", format_temperature(report.temperature));
    data.insert("Wind", format_wind_display(&report));
    data.insert("Visibility", format_visibility_display(report.visibility));
    data.insert("Pressure", format_pressure_display(&report));
    data.insert("Sky Conditions", format_sky_display(&report));

    WeatherResponse {
        success: true,
        icao_code: icao,
        summary: summarize(&report),
        data,
        report,
        raw_metar: raw,
    }
}

pub fn format_time_display(report: &ParsedReport, now: DateTime<Utc>) -> String {
    match report.observed_at.resolve(now) {
        Some(stamp) => stamp.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => report.observed_at.to_string(),
    }
}

pub fn format_conditions_display(report: &ParsedReport) -> String {
    if report.weather_phenomena.is_empty() {
        "Clear".to_string()
    } else {
        report.weather_phenomena.join(", ")
    }
}

pub fn format_wind_display(report: &ParsedReport) -> String {
    let wind = report.wind_or_calm();
    if wind.is_calm() {
        return "Calm".to_string();
    }

    format!(
        "{} mph ({} kt) from {}",
        wind.speed_mph.round() as i64,
        wind.speed_kt,
        wind.direction.label()
    )
}

pub fn format_visibility_display(visibility_mi: Option<f64>) -> String {
    match visibility_mi {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if v >= 10.0 => "10+ miles".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{} miles", v as i64),
        Some(v) => format!("{:.1} miles", v),
    }
}

pub fn format_pressure_display(report: &ParsedReport) -> String {
    match report.pressure {
        Some(p) => format!("{:.2} inHg ({} mb)", p.inches_hg, p.millibars.round() as i64),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_sky_display(report: &ParsedReport) -> String {
    if report.sky_layers.is_empty() {
        return "Not reported".to_string();
    }

    report
        .sky_layers
        .iter()
        .map(|layer| layer.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
