use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::MetarDecodeError;
use crate::models::{
    ObservationTime, ParsedReport, Pressure, SkyCoverage, SkyLayer, Temperature, Wind,
    WindDirection,
};
use crate::phenomena::KNOWN_CODES;
use crate::units::meters_to_statute_miles;

static STATION: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Z]{4}$"));
static TIME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(\d{2})(\d{2})(\d{2})Z$"));
static WIND: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^(\d{3}|VRB)(\d{2,3})(?:G(\d{2,3}))?KT$"));
static WIND_RANGE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(\d{3})V(\d{3})$"));
static VIS_WHOLE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^([PM])?(\d{1,2})SM$"));
static VIS_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^([PM])?(\d)/(\d{1,2})SM$"));
static VIS_LEADING_WHOLE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\d$"));
static VIS_METRIC: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(\d{4})$"));
static WEATHER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^[+-]?(?:VC)?((?:[A-Z]{2})+)$"));
static SKY: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^(SKC|CLR|NSC|NCD|FEW|SCT|BKN|OVC|VV)(\d{3}|///)?(CB|TCU|///)?$")
});
static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^(M?\d{2})/(M?\d{2}|//)?$"));
static ALTIMETER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^([AQ])(\d{4})$"));

// the patterns above are literals, a failure here is a typo caught by the tests
fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|e| panic!("invalid group pattern {}: {}", source, e))
}

const REMARKS_MARKER: &str = "RMK";
const CAVOK: &str = "CAVOK";
const REPORT_TYPE: &str = "METAR";
const MODIFIERS: [&str; 2] = ["AUTO", "COR"];

// visibility of 9999 meters means 10 km or more
const METRIC_UNLIMITED: u32 = 9999;
const METRIC_UNLIMITED_METERS: f64 = 10_000.0;

// splits the raw report into groups, dropping the remarks section and everything after it
pub fn tokenize(raw: &str) -> Result<Vec<&str>, MetarDecodeError> {
    if raw.trim().is_empty() {
        return Err(MetarDecodeError::EmptyReport);
    }

    Ok(raw
        .split_whitespace()
        .take_while(|group| *group != REMARKS_MARKER)
        .collect())
}

// decodes a raw metar string into a ParsedReport
// only an empty report or a missing station/time fails, every other group is optional and
// anything that can't be classified is skipped
pub fn decode(raw: &str) -> Result<ParsedReport, MetarDecodeError> {
    let tokens = tokenize(raw)?;
    let mut rest: &[&str] = &tokens;

    if rest.first() == Some(&REPORT_TYPE) {
        rest = &rest[1..];
    }

    let (station, rest) =
        classify_station(rest).ok_or(MetarDecodeError::MissingRequiredField("station"))?;
    let (observed_at, mut rest) =
        classify_time(rest).ok_or(MetarDecodeError::MissingRequiredField("time"))?;

    while let Some((first, tail)) = rest.split_first() {
        if !MODIFIERS.contains(first) {
            break;
        }
        rest = tail;
    }

    let mut body = ReportBody::default();
    // None once the altimeter has been read, everything after it is skipped
    let mut stage = Some(Stage::Wind);

    'groups: while let Some(group) = rest.first() {
        let remaining = Stage::ALL
            .iter()
            .filter(|s| stage.is_some_and(|current| **s >= current));

        for &candidate in remaining {
            if let Some(tail) = body.classify(candidate, rest) {
                debug!(group = *group, stage = ?candidate, "classified group");
                stage = if candidate.repeats() {
                    Some(candidate)
                } else {
                    candidate.next()
                };
                rest = tail;
                continue 'groups;
            }
        }

        debug!(group = *group, "skipping unrecognized group");
        rest = &rest[1..];
    }

    Ok(ParsedReport {
        station,
        observed_at,
        temperature: body.temperature,
        dewpoint: body.dewpoint,
        wind: body.wind,
        visibility: body.visibility,
        pressure: body.pressure,
        sky_layers: body.sky_layers,
        weather_phenomena: body.weather_phenomena,
    })
}

// the optional groups in the order they appear in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Wind,
    Visibility,
    Weather,
    Sky,
    Temperature,
    Altimeter,
}

impl Stage {
    const ALL: [Stage; 6] = [
        Stage::Wind,
        Stage::Visibility,
        Stage::Weather,
        Stage::Sky,
        Stage::Temperature,
        Stage::Altimeter,
    ];

    // weather and sky groups can appear several times in a row
    fn repeats(self) -> bool {
        matches!(self, Stage::Weather | Stage::Sky)
    }

    fn next(self) -> Option<Stage> {
        match self {
            Stage::Wind => Some(Stage::Visibility),
            Stage::Visibility => Some(Stage::Weather),
            Stage::Weather => Some(Stage::Sky),
            Stage::Sky => Some(Stage::Temperature),
            Stage::Temperature => Some(Stage::Altimeter),
            Stage::Altimeter => None,
        }
    }
}

// the optional fields collected while walking the groups
#[derive(Default)]
struct ReportBody {
    wind: Option<Wind>,
    visibility: Option<f64>,
    weather_phenomena: Vec<String>,
    sky_layers: Vec<SkyLayer>,
    temperature: Option<Temperature>,
    dewpoint: Option<Temperature>,
    pressure: Option<Pressure>,
}

impl ReportBody {
    // runs one classifier, storing its field and returning the unused groups when it matches
    fn classify<'a>(&mut self, stage: Stage, tokens: &'a [&'a str]) -> Option<&'a [&'a str]> {
        match stage {
            Stage::Wind => classify_wind(tokens).map(|(wind, rest)| {
                self.wind = Some(wind);
                rest
            }),
            Stage::Visibility => {
                if let Some((miles, layer, rest)) = classify_cavok(tokens) {
                    self.visibility = Some(miles);
                    self.sky_layers.push(layer);
                    return Some(rest);
                }
                classify_visibility(tokens).map(|(miles, rest)| {
                    self.visibility = Some(miles);
                    rest
                })
            }
            Stage::Weather => classify_weather(tokens).map(|(code, rest)| {
                self.weather_phenomena.push(code);
                rest
            }),
            Stage::Sky => classify_sky_layer(tokens).map(|(layer, rest)| {
                self.sky_layers.push(layer);
                rest
            }),
            Stage::Temperature => classify_temperature(tokens).map(|((temp, dew), rest)| {
                self.temperature = Some(temp);
                self.dewpoint = dew;
                rest
            }),
            Stage::Altimeter => classify_altimeter(tokens).map(|(pressure, rest)| {
                self.pressure = Some(pressure);
                rest
            }),
        }
    }
}

// four letter ICAO identifier like KJFK
pub fn classify_station<'a>(tokens: &'a [&'a str]) -> Option<(String, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    STATION
        .is_match(group)
        .then(|| (group.to_string(), rest))
}

// day, hour and minute like 081751Z
pub fn classify_time<'a>(tokens: &'a [&'a str]) -> Option<(ObservationTime, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    let caps = TIME.captures(group)?;

    let day: u32 = caps[1].parse().ok()?;
    let hour: u32 = caps[2].parse().ok()?;
    let minute: u32 = caps[3].parse().ok()?;

    if !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return None;
    }

    Some((ObservationTime { day, hour, minute }, rest))
}

// direction, speed and optional gust like 31021KT, VRB05KT or 09015G25KT
// an optional variable direction group like 280V350 right after it is claimed too
pub fn classify_wind<'a>(tokens: &'a [&'a str]) -> Option<(Wind, &'a [&'a str])> {
    let (group, mut rest) = tokens.split_first()?;
    let caps = WIND.captures(group)?;

    let direction = match &caps[1] {
        "VRB" => WindDirection::Variable,
        digits => {
            let degrees: u16 = digits.parse().ok()?;
            if degrees > 360 {
                return None;
            }
            WindDirection::from_degrees(degrees)
        }
    };
    let speed: u32 = caps[2].parse().ok()?;
    let gust: Option<u32> = match caps.get(3) {
        Some(g) => Some(g.as_str().parse().ok()?),
        None => None,
    };

    let mut wind = Wind::new(speed, gust, direction);

    if let Some((next, tail)) = rest.split_first() {
        if let Some(range) = WIND_RANGE.captures(next) {
            if let (Ok(from), Ok(to)) = (range[1].parse::<u16>(), range[2].parse::<u16>()) {
                wind.variable_range = Some((from, to));
                rest = tail;
            }
        }
    }

    Some((wind, rest))
}

// statute miles like 10SM, 1/4SM or the two group form 2 1/2SM, or metric meters like 9999
pub fn classify_visibility<'a>(tokens: &'a [&'a str]) -> Option<(f64, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;

    if let Some(caps) = VIS_WHOLE.captures(group) {
        let miles: f64 = caps[2].parse().ok()?;
        return Some((miles, rest));
    }

    if let Some(caps) = VIS_FRACTION.captures(group) {
        let miles = fraction(&caps[2], &caps[3])?;
        return Some((miles, rest));
    }

    if VIS_LEADING_WHOLE.is_match(group) {
        let (next, tail) = rest.split_first()?;
        let caps = VIS_FRACTION.captures(next)?;
        let whole: f64 = group.parse().ok()?;
        let miles = whole + fraction(&caps[2], &caps[3])?;
        return Some((miles, tail));
    }

    if let Some(caps) = VIS_METRIC.captures(group) {
        let meters: u32 = caps[1].parse().ok()?;
        let meters = if meters == METRIC_UNLIMITED {
            METRIC_UNLIMITED_METERS
        } else {
            f64::from(meters)
        };
        return Some((meters_to_statute_miles(meters), rest));
    }

    None
}

// CAVOK stands in for both visibility and sky: 10 km or more and no significant cloud
pub fn classify_cavok<'a>(tokens: &'a [&'a str]) -> Option<(f64, SkyLayer, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    if *group != CAVOK {
        return None;
    }

    let layer = SkyLayer {
        coverage: SkyCoverage::NoSignificantCloud,
        height_ft: None,
        cloud_type: None,
    };
    Some((meters_to_statute_miles(METRIC_UNLIMITED_METERS), layer, rest))
}

fn fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

// present weather like +TSRA, -SN, BR or VCSH (in the vicinity), kept verbatim
pub fn classify_weather<'a>(tokens: &'a [&'a str]) -> Option<(String, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    let caps = WEATHER.captures(group)?;

    let letters = caps[1].as_bytes();
    let all_known = letters.chunks(2).all(|pair| {
        std::str::from_utf8(pair)
            .map(|code| KNOWN_CODES.contains(&code))
            .unwrap_or(false)
    });

    all_known.then(|| (group.to_string(), rest))
}

// cloud layer like BKN029, OVC015CB, VV002, CLR or NSC
pub fn classify_sky_layer<'a>(tokens: &'a [&'a str]) -> Option<(SkyLayer, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    let caps = SKY.captures(group)?;

    let coverage = SkyCoverage::from_code(&caps[1])?;
    // heights are given in hundreds of feet
    let height_ft = caps
        .get(2)
        .and_then(|h| h.as_str().parse::<u32>().ok())
        .map(|hundreds| hundreds * 100);
    let cloud_type = caps
        .get(3)
        .map(|t| t.as_str())
        .filter(|t| *t != "///")
        .map(str::to_string);

    Some((
        SkyLayer {
            coverage,
            height_ft,
            cloud_type,
        },
        rest,
    ))
}

// temperature and dewpoint like 13/M11, the dewpoint may be missing as in 13/ or 13///
pub fn classify_temperature<'a>(
    tokens: &'a [&'a str],
) -> Option<((Temperature, Option<Temperature>), &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    let caps = TEMPERATURE.captures(group)?;

    let temperature = Temperature::from_celsius(signed_celsius(&caps[1])?);
    let dewpoint = caps
        .get(2)
        .and_then(|d| signed_celsius(d.as_str()))
        .map(Temperature::from_celsius);

    Some(((temperature, dewpoint), rest))
}

// M is used for minus, so M06 is -6
fn signed_celsius(value: &str) -> Option<f64> {
    match value.strip_prefix('M') {
        Some(digits) => digits.parse::<f64>().ok().map(|v| -v),
        None => value.parse::<f64>().ok(),
    }
}

// altimeter in hundredths of inches of mercury like A3012, or hectopascals like Q1013
pub fn classify_altimeter<'a>(tokens: &'a [&'a str]) -> Option<(Pressure, &'a [&'a str])> {
    let (group, rest) = tokens.split_first()?;
    let caps = ALTIMETER.captures(group)?;
    let value: f64 = caps[2].parse().ok()?;

    let pressure = match &caps[1] {
        "A" => Pressure::from_inches(value / 100.0),
        _ => Pressure::from_millibars(value),
    };

    Some((pressure, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: &str = "KJFK 081751Z 31021KT 10SM CLR 13/M11 A3012 RMK AO2";
    const RAIN: &str = "KHIO 081757Z 17005KT 2 1/2SM RA BR BKN009 BKN029 OVC037 10/09 A3014";
    const SNOW: &str = "CYHZ 081800Z 36020KT 10SM DRSN OVC011 M06/M08 A2997";
    const FOG: &str = "KSFO 081756Z 30008KT 1/4SM FG VV002 15/15 A3000";
    const THUNDERSTORM: &str = "KMIA 081753Z 09015G25KT 3SM +TSRA BKN008 OVC015CB 24/22 A2990";
    const CALM: &str = "KSEA 081753Z 00000KT 10SM FEW022 SCT050 BKN130 07/04 A3025";
    const VARIABLE_WIND: &str = "KATL 081752Z VRB05KT 10SM FEW250 18/M03 A3020";
    const LIGHT_RAIN: &str = "KORD 081756Z 18010KT 10SM -RA SCT035 BKN055 OVC095 12/08 A2995";

    #[test]
    fn tokenize_drops_remarks() {
        let tokens = tokenize(CLEAR).unwrap();
        assert_eq!(tokens.last(), Some(&"A3012"));
        assert!(!tokens.contains(&"RMK"));
        assert!(!tokens.contains(&"AO2"));
    }

    #[test]
    fn tokenize_collapses_whitespace() {
        let tokens = tokenize("  KJFK\t081751Z \n 31021KT  ").unwrap();
        assert_eq!(tokens, vec!["KJFK", "081751Z", "31021KT"]);
    }

    #[test]
    fn tokenize_rejects_blank_input() {
        assert_eq!(tokenize(""), Err(MetarDecodeError::EmptyReport));
        assert_eq!(tokenize("   \n"), Err(MetarDecodeError::EmptyReport));
    }

    #[test]
    fn decode_clear_weather() {
        let report = decode(CLEAR).unwrap();
        assert_eq!(report.station, "KJFK");
        assert_eq!(
            report.observed_at,
            ObservationTime { day: 8, hour: 17, minute: 51 }
        );

        let wind = report.wind.unwrap();
        assert_eq!(wind.speed_kt, 21);
        assert_eq!(
            wind.direction,
            WindDirection::Bearing { degrees: 310, compass: "NW" }
        );

        assert_eq!(report.visibility, Some(10.0));
        assert_eq!(report.sky_layers.len(), 1);
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::Clear);

        let temp = report.temperature.unwrap();
        assert_eq!(temp.celsius, 13.0);
        assert_eq!(temp.fahrenheit.round(), 55.0);
        assert_eq!(report.dewpoint.unwrap().celsius, -11.0);

        let pressure = report.pressure.unwrap();
        assert!((pressure.inches_hg - 30.12).abs() < 1e-9);
        assert_eq!(pressure.millibars.round(), 1020.0);
        assert!(report.weather_phenomena.is_empty());
    }

    #[test]
    fn decode_rain_with_fractional_visibility() {
        let report = decode(RAIN).unwrap();
        assert_eq!(report.station, "KHIO");
        assert_eq!(report.visibility, Some(2.5));
        assert_eq!(report.weather_phenomena, vec!["RA", "BR"]);

        let heights: Vec<Option<u32>> = report.sky_layers.iter().map(|l| l.height_ft).collect();
        assert_eq!(heights, vec![Some(900), Some(2900), Some(3700)]);
        assert_eq!(report.sky_layers[2].coverage, SkyCoverage::Overcast);
    }

    #[test]
    fn decode_drifting_snow_below_freezing() {
        let report = decode(SNOW).unwrap();
        assert_eq!(report.station, "CYHZ");
        assert_eq!(report.weather_phenomena, vec!["DRSN"]);
        assert_eq!(report.temperature.unwrap().celsius, -6.0);
        assert_eq!(report.dewpoint.unwrap().celsius, -8.0);
    }

    #[test]
    fn decode_fog_with_vertical_visibility() {
        let report = decode(FOG).unwrap();
        assert_eq!(report.visibility, Some(0.25));
        assert_eq!(report.weather_phenomena, vec!["FG"]);
        assert_eq!(
            report.sky_layers,
            vec![SkyLayer {
                coverage: SkyCoverage::VerticalVisibility,
                height_ft: Some(200),
                cloud_type: None,
            }]
        );
    }

    #[test]
    fn decode_thunderstorm_with_gusts() {
        let report = decode(THUNDERSTORM).unwrap();
        let wind = report.wind.unwrap();
        assert_eq!(wind.speed_kt, 15);
        assert_eq!(wind.gust_kt, Some(25));
        assert_eq!(wind.direction.label(), "E");
        assert_eq!(report.weather_phenomena, vec!["+TSRA"]);
        assert_eq!(report.sky_layers[1].cloud_type.as_deref(), Some("CB"));
        assert_eq!(report.visibility, Some(3.0));
    }

    #[test]
    fn decode_calm_wind() {
        let report = decode(CALM).unwrap();
        let wind = report.wind.unwrap();
        assert_eq!(wind.speed_kt, 0);
        assert_eq!(wind.speed_mph, 0.0);
        assert_eq!(wind.direction, WindDirection::Calm);
        assert_eq!(report.sky_layers.len(), 3);
    }

    #[test]
    fn zero_speed_is_calm_whatever_the_bearing() {
        for group in ["00000KT", "27000KT", "36000KT", "VRB00KT"] {
            let raw = format!("KSEA 081753Z {} 10SM CLR 07/04 A3025", group);
            let wind = decode(&raw).unwrap().wind.unwrap();
            assert_eq!(wind.direction, WindDirection::Calm, "{}", group);
        }
    }

    #[test]
    fn decode_variable_wind() {
        let report = decode(VARIABLE_WIND).unwrap();
        let wind = report.wind.unwrap();
        assert_eq!(wind.speed_kt, 5);
        assert_eq!(wind.direction, WindDirection::Variable);
        assert_eq!(report.dewpoint.unwrap().celsius, -3.0);
    }

    #[test]
    fn decode_light_rain() {
        let report = decode(LIGHT_RAIN).unwrap();
        assert_eq!(report.weather_phenomena, vec!["-RA"]);
        assert_eq!(report.sky_layers.len(), 3);
    }

    #[test]
    fn decode_variable_direction_range() {
        let report = decode("KDEN 081753Z 31015KT 280V350 10SM SCT080 20/M02 A3001").unwrap();
        let wind = report.wind.unwrap();
        assert_eq!(wind.variable_range, Some((280, 350)));
        assert_eq!(report.visibility, Some(10.0));
    }

    #[test]
    fn decode_skips_report_type_and_modifiers() {
        let report = decode("METAR KBOS 081754Z AUTO 27010KT 10SM CLR 05/M03 A3010").unwrap();
        assert_eq!(report.station, "KBOS");
        assert_eq!(report.wind.unwrap().speed_kt, 10);
    }

    #[test]
    fn decode_skips_correction_modifier() {
        let report = decode("KBOS 081754Z COR 27010KT 10SM CLR 05/M03 A3010").unwrap();
        let wind = report.wind.unwrap();
        assert_eq!(wind.speed_kt, 10);
        assert_eq!(wind.direction.label(), "W");
        assert_eq!(report.visibility, Some(10.0));
        assert_eq!(report.pressure.unwrap().inches_hg, 30.10);
    }

    #[test]
    fn decode_sky_height_missing() {
        let report = decode("KDEN 081753Z AUTO 21008KT 10SM BKN/// 21/M02 A3001").unwrap();
        assert_eq!(report.sky_layers.len(), 1);
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::Broken);
        assert_eq!(report.sky_layers[0].height_ft, None);
        assert_eq!(report.sky_layers[0].cloud_type, None);
        assert_eq!(report.temperature.unwrap().celsius, 21.0);
    }

    #[test]
    fn decode_vicinity_weather() {
        let report = decode("KJFK 081751Z 31021KT 10SM VCSH FEW020 13/M11 A3012").unwrap();
        assert_eq!(report.weather_phenomena, vec!["VCSH"]);
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::Few);

        let report = decode("KJFK 081751Z 31021KT 10SM -RA VCTS FEW020 13/M11 A3012").unwrap();
        assert_eq!(report.weather_phenomena, vec!["-RA", "VCTS"]);
    }

    #[test]
    fn decode_cavok() {
        let report = decode("LFPG 081800Z 22010KT CAVOK 18/09 Q1021").unwrap();
        assert!((report.visibility.unwrap() - 6.2137).abs() < 1e-3);
        assert_eq!(report.sky_layers.len(), 1);
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::NoSignificantCloud);
        assert!(report.sky_layers[0].coverage.is_clear());
        assert_eq!(report.temperature.unwrap().celsius, 18.0);
        assert_eq!(report.pressure.unwrap().millibars, 1021.0);
    }

    #[test]
    fn decode_no_cloud_groups() {
        let report = decode("EGLL 081750Z 24012KT 9999 NSC 09/04 Q1013").unwrap();
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::NoSignificantCloud);

        let report = decode("EGLL 081750Z AUTO 24012KT 9999 NCD 09/04 Q1013").unwrap();
        assert_eq!(report.sky_layers[0].coverage, SkyCoverage::NoCloudDetected);
        assert_eq!(report.sky_layers[0].height_ft, None);
    }

    #[test]
    fn decode_metric_groups() {
        let report = decode("EGLL 081750Z 24012KT 9999 FEW040 09/04 Q1013").unwrap();
        assert!((report.visibility.unwrap() - 6.2137).abs() < 1e-3);
        let pressure = report.pressure.unwrap();
        assert_eq!(pressure.millibars, 1013.0);
        assert!((pressure.inches_hg - 29.91).abs() < 0.01);
    }

    #[test]
    fn decode_visibility_prefixes() {
        let more = decode("KLAX 081753Z 25008KT P6SM SKC 18/10 A2998").unwrap();
        assert_eq!(more.visibility, Some(6.0));
        let less = decode("KLAX 081753Z 25008KT M1/4SM FG VV001 12/12 A2998").unwrap();
        assert_eq!(less.visibility, Some(0.25));
    }

    #[test]
    fn decode_missing_dewpoint() {
        let report = decode("KORD 081800Z 18010KT 10SM CLR 15/ A3000").unwrap();
        assert_eq!(report.temperature.unwrap().celsius, 15.0);
        assert_eq!(report.dewpoint, None);
    }

    #[test]
    fn decode_empty_string_fails() {
        assert_eq!(decode(""), Err(MetarDecodeError::EmptyReport));
    }

    #[test]
    fn decode_invalid_report_fails_on_station() {
        assert_eq!(
            decode("INVALID METAR STRING"),
            Err(MetarDecodeError::MissingRequiredField("station"))
        );
    }

    #[test]
    fn decode_missing_time_fails() {
        assert_eq!(
            decode("KJFK 31021KT 10SM CLR"),
            Err(MetarDecodeError::MissingRequiredField("time"))
        );
        assert_eq!(
            decode("KJFK 082551Z 31021KT"),
            Err(MetarDecodeError::MissingRequiredField("time"))
        );
    }

    #[test]
    fn unrecognized_groups_are_skipped() {
        let report = decode("KJFK 081751Z FOO BAR 12345 ?!").unwrap();
        assert_eq!(report.station, "KJFK");
        assert_eq!(report.wind, None);
        assert_eq!(report.visibility, None);
        assert_eq!(report.temperature, None);
        assert_eq!(report.dewpoint, None);
        assert_eq!(report.pressure, None);
        assert!(report.sky_layers.is_empty());
        assert!(report.weather_phenomena.is_empty());
    }

    #[test]
    fn one_bad_group_does_not_hide_the_rest() {
        let report = decode("KORD 081800Z 00000KT 10SM XYZZY CLR 15/10 A3000").unwrap();
        assert_eq!(report.visibility, Some(10.0));
        assert_eq!(report.sky_layers.len(), 1);
        assert_eq!(report.temperature.unwrap().celsius, 15.0);
        assert!(report.pressure.is_some());
    }

    #[test]
    fn groups_out_of_order_are_skipped() {
        // a wind group after the sky section is not a wind group
        let report = decode("KORD 081800Z 10SM CLR 18010KT 15/10 A3000").unwrap();
        assert_eq!(report.wind, None);
        assert_eq!(report.visibility, Some(10.0));
        assert!(report.pressure.is_some());
    }

    #[test]
    fn groups_after_the_altimeter_are_skipped() {
        let report = decode("KORD 081800Z 18010KT 10SM CLR 15/10 A3000 25015KT FEW020 Q1013").unwrap();
        assert_eq!(report.wind.unwrap().speed_kt, 10);
        assert_eq!(report.sky_layers.len(), 1);
        assert_eq!(report.pressure.unwrap().inches_hg, 30.0);
    }

    #[test]
    fn repeated_groups_are_kept_in_order() {
        let report = decode("KORD 081800Z 18010KT 3SM -RA BR -RA BKN010 BKN010 OVC020 10/09 A2990")
            .unwrap();
        assert_eq!(report.weather_phenomena, vec!["-RA", "BR", "-RA"]);
        let codes: Vec<&str> = report.sky_layers.iter().map(|l| l.coverage.code()).collect();
        assert_eq!(codes, vec!["BKN", "BKN", "OVC"]);
    }

    #[test]
    fn unknown_weather_letters_are_not_weather() {
        assert!(classify_weather(&["XXRA"]).is_none());
        assert!(classify_weather(&["+TSRA"]).is_some());
        assert!(classify_weather(&["-"]).is_none());
        assert!(classify_weather(&["VC"]).is_none());
        assert!(classify_weather(&["VCXX"]).is_none());
        assert!(classify_weather(&["+VCFC"]).is_some());
    }

    #[test]
    fn classifiers_decline_without_consuming() {
        let tokens = ["10SM", "CLR"];
        assert!(classify_wind(&tokens).is_none());
        let (miles, rest) = classify_visibility(&tokens).unwrap();
        assert_eq!(miles, 10.0);
        assert_eq!(rest, &["CLR"]);
    }

    #[test]
    fn zero_denominator_is_not_visibility() {
        assert!(classify_visibility(&["1/0SM"]).is_none());
    }

    #[test]
    fn decode_is_deterministic() {
        for raw in [CLEAR, RAIN, SNOW, FOG, THUNDERSTORM, CALM, VARIABLE_WIND, LIGHT_RAIN] {
            assert_eq!(decode(raw).unwrap(), decode(raw).unwrap());
        }
    }

    #[test]
    fn pairs_are_never_half_populated() {
        for raw in [CLEAR, RAIN, SNOW, FOG, THUNDERSTORM, CALM, VARIABLE_WIND, LIGHT_RAIN] {
            let report = decode(raw).unwrap();
            for temp in [report.temperature, report.dewpoint].into_iter().flatten() {
                assert!(temp.celsius.is_finite() && temp.fahrenheit.is_finite());
            }
            let pressure = report.pressure.unwrap();
            assert!(pressure.millibars > 900.0 && pressure.inches_hg > 25.0);
        }
    }
}
