use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::compass::bearing_to_compass;
use crate::services::MetarSource;
use crate::units::{celsius_to_fahrenheit, inhg_to_millibars, knots_to_mph, millibars_to_inhg};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MetarSource>,
}

/// Everything decoded from one METAR observation.
///
/// Built once by [`decode`](crate::parser::decode) and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReport {
    pub station: String,
    pub observed_at: ObservationTime,
    pub temperature: Option<Temperature>,
    pub dewpoint: Option<Temperature>,
    /// `None` when the report carries no wind group; treat as calm.
    pub wind: Option<Wind>,
    /// Statute miles.
    pub visibility: Option<f64>,
    pub pressure: Option<Pressure>,
    pub sky_layers: Vec<SkyLayer>,
    pub weather_phenomena: Vec<String>,
}

impl ParsedReport {
    pub fn wind_or_calm(&self) -> Wind {
        self.wind.clone().unwrap_or_default()
    }
}

/// Day of month plus UTC hour and minute, as carried by the `ddhhmmZ` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservationTime {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl ObservationTime {
    /// Anchors the observation to a full timestamp: the latest date with this
    /// day of month that is not after `now`, looking back up to a year.
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let this_month = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?;

        (0..12)
            .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
            .filter_map(|first| first.with_day(self.day))
            .filter_map(|date| date.and_hms_opt(self.hour, self.minute, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .find(|stamp| *stamp <= now)
    }
}

impl fmt::Display for ObservationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}, {:02}:{:02}Z", self.day, self.hour, self.minute)
    }
}

/// A temperature carried in both units, derived from a single Celsius value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
        }
    }
}

/// Altimeter setting in millibars and inches of mercury.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pressure {
    pub millibars: f64,
    pub inches_hg: f64,
}

impl Pressure {
    pub fn from_inches(inches_hg: f64) -> Self {
        Self {
            millibars: inhg_to_millibars(inches_hg),
            inches_hg,
        }
    }

    pub fn from_millibars(millibars: f64) -> Self {
        Self {
            millibars,
            inches_hg: millibars_to_inhg(millibars),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindDirection {
    Calm,
    Variable,
    Bearing {
        degrees: u16,
        compass: &'static str,
    },
}

impl WindDirection {
    pub fn from_degrees(degrees: u16) -> Self {
        WindDirection::Bearing {
            degrees,
            compass: bearing_to_compass(Some(f64::from(degrees))),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WindDirection::Calm => "Calm",
            WindDirection::Variable => "Variable",
            WindDirection::Bearing { compass, .. } => *compass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub speed_kt: u32,
    pub speed_mph: f64,
    pub gust_kt: Option<u32>,
    pub gust_mph: Option<f64>,
    pub direction: WindDirection,
    /// Extremes of a variable direction group such as `280V350`.
    pub variable_range: Option<(u16, u16)>,
}

impl Wind {
    /// Builds a wind record, forcing the direction to calm whenever the speed is zero.
    pub fn new(speed_kt: u32, gust_kt: Option<u32>, direction: WindDirection) -> Self {
        let direction = if speed_kt == 0 {
            WindDirection::Calm
        } else {
            direction
        };

        Self {
            speed_kt,
            speed_mph: knots_to_mph(f64::from(speed_kt)),
            gust_kt,
            gust_mph: gust_kt.map(|g| knots_to_mph(f64::from(g))),
            direction,
            variable_range: None,
        }
    }

    pub fn is_calm(&self) -> bool {
        self.speed_kt == 0
    }
}

impl Default for Wind {
    fn default() -> Self {
        Wind::new(0, None, WindDirection::Calm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCoverage {
    SkyClear,
    Clear,
    NoSignificantCloud,
    NoCloudDetected,
    Few,
    Scattered,
    Broken,
    Overcast,
    VerticalVisibility,
}

impl SkyCoverage {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SKC" => Some(SkyCoverage::SkyClear),
            "CLR" => Some(SkyCoverage::Clear),
            "NSC" => Some(SkyCoverage::NoSignificantCloud),
            "NCD" => Some(SkyCoverage::NoCloudDetected),
            "FEW" => Some(SkyCoverage::Few),
            "SCT" => Some(SkyCoverage::Scattered),
            "BKN" => Some(SkyCoverage::Broken),
            "OVC" => Some(SkyCoverage::Overcast),
            "VV" => Some(SkyCoverage::VerticalVisibility),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SkyCoverage::SkyClear => "SKC",
            SkyCoverage::Clear => "CLR",
            SkyCoverage::NoSignificantCloud => "NSC",
            SkyCoverage::NoCloudDetected => "NCD",
            SkyCoverage::Few => "FEW",
            SkyCoverage::Scattered => "SCT",
            SkyCoverage::Broken => "BKN",
            SkyCoverage::Overcast => "OVC",
            SkyCoverage::VerticalVisibility => "VV",
        }
    }

    // NSC and NCD (and CAVOK, which decodes to NSC) read as clear skies
    pub fn is_clear(&self) -> bool {
        matches!(
            self,
            SkyCoverage::SkyClear
                | SkyCoverage::Clear
                | SkyCoverage::NoSignificantCloud
                | SkyCoverage::NoCloudDetected
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkyLayer {
    pub coverage: SkyCoverage,
    pub height_ft: Option<u32>,
    /// Convective cloud suffix such as `CB` or `TCU`.
    pub cloud_type: Option<String>,
}

// renders the layer the way it is listed on the results page, like "BKN at 2,900 ft"
impl fmt::Display for SkyLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coverage.code())?;
        if let Some(height) = self.height_ft {
            write!(f, " at {} ft", group_thousands(height))?;
        }
        match self.cloud_type.as_deref() {
            Some("CB") => write!(f, " (cumulonimbus)"),
            Some("TCU") => write!(f, " (towering cumulus)"),
            Some(other) => write!(f, " ({})", other),
            None => Ok(()),
        }
    }
}

// formats a whole number with comma separators, 12000 becomes "12,000"
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub icao_code: String,
    pub summary: String,
    pub data: BTreeMap<&'static str, String>,
    pub report: ParsedReport,
    pub raw_metar: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
