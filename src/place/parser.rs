//! Free-text coordinate parsing.
//!
//! Line format:  `<lat>[hemisphere], <lon>[hemisphere][, description]`
//! e.g. `50.0870N, 14.4210E, Prague Castle` or `-33.8688, 151.2093`.
//! Hemisphere letters are case-insensitive; S and W negate.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::set::LocationSet;
use super::types::{Location, ParseError, SourceMeta};

lazy_static! {
    static ref COORD_REGEX: Regex =
        Regex::new(r"^(?i)([+-])?([0-9]{1,3}\.[0-9]+)([a-z-])?$").unwrap();
}

const LABEL_SEPARATOR: &str = " - ";

/// Hemisphere suffix of a coordinate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Look up a marker. Anything outside N/S/E/W has no hemisphere.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Parse one coordinate field into signed decimal degrees.
pub fn parse_coordinate(field: &str) -> Result<f64, ParseError> {
    let caps = COORD_REGEX
        .captures(field)
        .ok_or_else(|| ParseError::InvalidCoordinate(field.to_string()))?;

    let value: f64 = caps[2]
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate(field.to_string()))?;
    let leading_sign = caps.get(1).map(|m| m.as_str());

    match (leading_sign, caps.get(3).map(|m| m.as_str())) {
        (Some(_), Some(_)) => Err(ParseError::InvalidCoordinate(field.to_string())),
        (sign, None) => Ok(if sign == Some("-") { -value } else { value }),
        (None, Some(marker)) => Hemisphere::from_marker(marker)
            .map(|h| value * h.sign())
            .ok_or_else(|| ParseError::UnknownHemisphere(marker.to_string())),
    }
}

/// Parse a line, reporting why it was rejected.
pub fn try_parse_line(
    line: &str,
    main_title: Option<&str>,
    url: Option<&str>,
) -> Result<Location, ParseError> {
    let parts: Vec<&str> = line.splitn(3, ',').map(str::trim).collect();
    if parts.len() < 2 {
        return Err(ParseError::TooFewFields(parts.len()));
    }

    let lat = parse_coordinate(parts[0])?;
    let lon = parse_coordinate(parts[1])?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ParseError::OutOfRange { axis: "latitude", value: parts[0].to_string() });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ParseError::OutOfRange { axis: "longitude", value: parts[1].to_string() });
    }

    let description = parts.get(2).copied().unwrap_or("");
    let text = [main_title.unwrap_or(""), description].join(LABEL_SEPARATOR);

    Ok(Location::new(lat, lon, &text, url))
}

/// Parse a line; malformed lines yield `None`.
pub fn parse_line(line: &str, main_title: Option<&str>, url: Option<&str>) -> Option<Location> {
    try_parse_line(line, main_title, url).ok()
}

/// Parse every line of a text block into `set`. Returns the number of accepted lines.
pub fn parse_multiline(text: &str, meta: &SourceMeta, set: &mut LocationSet) -> usize {
    let title = meta.label_title();
    let normalized = text.trim().replace("\r\n", "\n");

    let mut accepted = 0;
    for (lineno, line) in normalized.split('\n').enumerate() {
        match try_parse_line(line, title.as_deref(), meta.url.as_deref()) {
            Ok(loc) => {
                set.add(loc);
                accepted += 1;
            }
            Err(e) => debug!("skipping line {} ({:?}): {}", lineno + 1, line, e),
        }
    }
    accepted
}
