// turns decoded report fields into plain english phrases and composes the summary sentence

use crate::compass::expand_compass_direction;
use crate::models::{
    group_thousands, ParsedReport, Pressure, SkyCoverage, SkyLayer, Temperature, Wind,
    WindDirection,
};
use crate::phenomena;

pub const NOT_AVAILABLE: &str = "Not available";
pub const SKY_NOT_REPORTED: &str = "Sky conditions not reported";
pub const UNAVAILABLE_SUMMARY: &str = "Weather data unavailable.";

// visibility at or above this many miles is shown as unlimited
const UNLIMITED_VISIBILITY_MI: f64 = 10.0;

// rounds half away from zero to a whole number for display
fn whole(value: f64) -> i64 {
    value.round() as i64
}

// formats temperature as "55°F (13°C)"
pub fn format_temperature(temperature: Option<Temperature>) -> String {
    match temperature {
        Some(t) => format!("{}°F ({}°C)", whole(t.fahrenheit), whole(t.celsius)),
        None => NOT_AVAILABLE.to_string(),
    }
}

// formats wind like "24 mph from the northwest", anything that rounds to zero is calm
pub fn format_wind(wind: &Wind) -> String {
    let speed = whole(wind.speed_mph);
    if wind.is_calm() || speed == 0 {
        return "Calm winds".to_string();
    }

    let mut phrase = match wind.direction {
        WindDirection::Calm => return "Calm winds".to_string(),
        WindDirection::Variable => format!("{} mph from variable directions", speed),
        WindDirection::Bearing { compass, .. } => format!(
            "{} mph from the {}",
            speed,
            expand_compass_direction(compass).to_lowercase()
        ),
    };

    if let Some(gust) = wind.gust_mph {
        phrase.push_str(&format!(", gusting to {} mph", whole(gust)));
    }

    phrase
}

// formats visibility to one decimal place, 10 miles or more is unlimited
pub fn format_visibility(visibility_mi: Option<f64>) -> String {
    let Some(miles) = visibility_mi else {
        return NOT_AVAILABLE.to_string();
    };

    let rounded = (miles * 10.0).round() / 10.0;
    if rounded >= UNLIMITED_VISIBILITY_MI {
        "10+ miles (unlimited)".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{} miles", rounded as i64)
    } else {
        format!("{:.1} miles", rounded)
    }
}

// formats the cloud layers in report order, any clear layer means the whole sky is clear
pub fn format_sky_conditions(layers: &[SkyLayer]) -> String {
    if layers.is_empty() {
        return SKY_NOT_REPORTED.to_string();
    }

    if layers.iter().any(|layer| layer.coverage.is_clear()) {
        return "Clear skies".to_string();
    }

    layers
        .iter()
        .map(describe_layer)
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_layer(layer: &SkyLayer) -> String {
    let coverage = match layer.coverage {
        SkyCoverage::SkyClear
        | SkyCoverage::Clear
        | SkyCoverage::NoSignificantCloud
        | SkyCoverage::NoCloudDetected => "Clear skies",
        SkyCoverage::Few => "Few clouds",
        SkyCoverage::Scattered => "Scattered clouds",
        SkyCoverage::Broken => "Broken clouds",
        SkyCoverage::Overcast => "Overcast",
        SkyCoverage::VerticalVisibility => "Vertical visibility",
    };

    match layer.height_ft {
        Some(height) => format!("{} at {} ft", coverage, group_thousands(height)),
        None => coverage.to_string(),
    }
}

// formats pressure as "30.1 inHg (1020 mb)"
pub fn format_pressure(pressure: Option<Pressure>) -> String {
    match pressure {
        Some(p) => format!("{:.1} inHg ({} mb)", p.inches_hg, whole(p.millibars)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_weather_phenomena(codes: &[String]) -> Option<String> {
    phenomena::translate(codes)
}

/// Builds the plain-English summary for a decoded report.
///
/// Parts are added in a fixed order (sky, weather, temperature, wind,
/// visibility, pressure) and missing fields are left out. Wind is always
/// described, as calm when the report has no wind group, unless there is
/// nothing else to say at all, in which case the fallback sentence is
/// returned instead.
pub fn summarize(report: &ParsedReport) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !report.sky_layers.is_empty() {
        parts.push(format_sky_conditions(&report.sky_layers));
    }

    if let Some(weather) = format_weather_phenomena(&report.weather_phenomena) {
        parts.push(format!("with {}", weather));
    }

    if report.temperature.is_some() {
        parts.push(format!(
            "Temperature is {}",
            format_temperature(report.temperature)
        ));
    }

    let wind_position = parts.len();

    if report.visibility.is_some() {
        parts.push(format!(
            "Visibility is {}",
            format_visibility(report.visibility)
        ));
    }

    if report.pressure.is_some() {
        parts.push(format!(
            "Barometric pressure is {}",
            format_pressure(report.pressure)
        ));
    }

    if parts.is_empty() && report.wind.is_none() {
        return UNAVAILABLE_SUMMARY.to_string();
    }

    parts.insert(wind_position, format_wind(&report.wind_or_calm()));

    let mut summary = parts.join(". ");
    if !summary.ends_with('.') {
        summary.push('.');
    }
    summary
}
