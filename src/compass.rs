// wind direction helpers: 16-point compass buckets and their spelled out names

pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
    "NW", "NNW",
];

const BUCKET_WIDTH: f64 = 22.5;

pub const VARIABLE: &str = "Variable";

// converts a bearing in degrees to one of the 16 compass points, a missing bearing is "Variable"
// each point covers 22.5 degrees centered on itself, so N spans 348.75 up to 11.25
pub fn bearing_to_compass(degrees: Option<f64>) -> &'static str {
    match degrees {
        Some(degrees) => {
            let normalized = degrees.rem_euclid(360.0);
            let index = ((normalized + BUCKET_WIDTH / 2.0) / BUCKET_WIDTH) as usize % 16;
            COMPASS_POINTS[index]
        }
        None => VARIABLE,
    }
}

// expands a compass abbreviation like NNE to North-Northeast, anything unknown is returned as is
pub fn expand_compass_direction(label: &str) -> &str {
    match label {
        "N" => "North",
        "NNE" => "North-Northeast",
        "NE" => "Northeast",
        "ENE" => "East-Northeast",
        "E" => "East",
        "ESE" => "East-Southeast",
        "SE" => "Southeast",
        "SSE" => "South-Southeast",
        "S" => "South",
        "SSW" => "South-Southwest",
        "SW" => "Southwest",
        "WSW" => "West-Southwest",
        "W" => "West",
        "WNW" => "West-Northwest",
        "NW" => "Northwest",
        "NNW" => "North-Northwest",
        other => other,
    }
}
