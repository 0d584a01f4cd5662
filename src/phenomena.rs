// translates present weather codes like +TSRA into words like "heavy thunderstorm rain"

// the order of this table matters: every occurrence of a pattern is replaced before the next
// entry is tried, so intensity markers go first and descriptors come before precipitation
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("+", "heavy"),
    ("-", "light"),
    // vicinity qualifier, VCSH reads as "nearby showers"
    ("VC", "nearby"),
    ("TS", "thunderstorm"),
    ("SH", "showers"),
    ("FZ", "freezing"),
    ("BL", "blowing"),
    ("DR", "drifting"),
    ("MI", "shallow"),
    ("BC", "patches"),
    ("PR", "partial"),
    ("RA", "rain"),
    ("SN", "snow"),
    ("DZ", "drizzle"),
    ("FG", "fog"),
    ("BR", "mist"),
    ("HZ", "haze"),
    ("VA", "volcanic ash"),
    ("DU", "dust"),
    ("SA", "sand"),
    ("FU", "smoke"),
    ("PY", "spray"),
    ("SQ", "squalls"),
    ("PO", "dust whirls"),
    ("DS", "dust storm"),
    ("SS", "sandstorm"),
    ("GR", "hail"),
    ("GS", "small hail"),
    ("UP", "unknown precipitation"),
    ("IC", "ice crystals"),
    ("PL", "ice pellets"),
    ("SG", "snow grains"),
    ("FC", "funnel cloud"),
];

// every two letter code the parser accepts inside a weather group
pub const KNOWN_CODES: &[&str] = &[
    "MI", "BC", "DR", "BL", "SH", "TS", "FZ", "PR", "DZ", "RA", "SN", "SG", "IC", "PL", "GR",
    "GS", "UP", "BR", "FG", "FU", "VA", "DU", "SA", "HZ", "PY", "PO", "SQ", "FC", "SS", "DS",
];

// translates a single weather token, returns an empty string if nothing is left after cleanup
pub fn translate_code(code: &str) -> String {
    let replaced = TRANSLATIONS
        .iter()
        .fold(code.to_string(), |acc, (pattern, words)| {
            acc.replace(pattern, &format!(" {} ", words))
        });

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

// translates every weather token in report order and joins them with ", "
// no codes at all means there is nothing to say, so None rather than an empty string
pub fn translate(codes: &[String]) -> Option<String> {
    if codes.is_empty() {
        return None;
    }

    let phrases: Vec<String> = codes
        .iter()
        .map(|code| translate_code(code))
        .filter(|phrase| !phrase.is_empty())
        .collect();

    if phrases.is_empty() {
        None
    } else {
        Some(phrases.join(", "))
    }
}
