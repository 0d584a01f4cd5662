// unit conversions used by the parser and the formatters
// nothing here rounds, that is left to whoever displays the value

pub const MPH_PER_KNOT: f64 = 1.15078;
pub const MB_PER_INHG: f64 = 33.8639;
pub const METERS_PER_STATUTE_MILE: f64 = 1609.344;

// converts wind speed from knots to miles per hour
pub fn knots_to_mph(knots: f64) -> f64 {
    knots * MPH_PER_KNOT
}

// converts temperature from celsius to fahrenheit
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

// converts an altimeter setting from inches of mercury to millibars (hectopascals)
pub fn inhg_to_millibars(inches: f64) -> f64 {
    inches * MB_PER_INHG
}

pub fn millibars_to_inhg(millibars: f64) -> f64 {
    millibars / MB_PER_INHG
}

// metric visibility groups are reported in meters
pub fn meters_to_statute_miles(meters: f64) -> f64 {
    meters / METERS_PER_STATUTE_MILE
}
