//! Parsers for the `POINT`, `POLYGON` and `MULTIPOLYGON` text forms.

use crate::coord::{LatLng, Ring};
use crate::error::GeometryError;
use crate::scan::RingScanner;

const POINT: &str = "POINT";
const POLYGON: &str = "POLYGON";
const MULTIPOLYGON: &str = "MULTIPOLYGON";

/// Parses `POINT (<lon> <lat>)` into a [`LatLng`].
///
/// Returns `None` for empty input or anything that does not match.
#[must_use]
pub fn parse_point(text: &str) -> Option<LatLng> {
    try_parse_point(text).ok()
}

/// Parses `POINT (<lon> <lat>)`, reporting why the text was rejected.
///
/// The pattern may appear anywhere in the text (e.g. after an `SRID=...;`
/// prefix), but `POINT` must start a word, so `MULTIPOINT` is not a point. Both components must be plain decimals: an optional sign, digits
/// and at most one decimal point.
///
/// # Errors
///
/// Returns a [`GeometryError`] describing the first problem found.
pub fn try_parse_point(text: &str) -> Result<LatLng, GeometryError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GeometryError::Empty);
    }

    let start = find_keyword(text, POINT)
        .ok_or_else(|| GeometryError::UnsupportedKind(leading_keyword(text)))?;
    let inner = text[start + POINT.len()..]
        .trim_start()
        .strip_prefix('(')
        .and_then(|rest| rest.split_once(')'))
        .map(|(inner, _)| inner)
        .ok_or(GeometryError::MissingWrapper(POINT))?;

    let mut tokens = inner.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(lon), Some(lat), None) => {
            let lon = parse_decimal(lon).ok_or_else(|| malformed(inner))?;
            let lat = parse_decimal(lat).ok_or_else(|| malformed(inner))?;
            Ok(LatLng::from_lon_lat(lon, lat))
        }
        _ => Err(malformed(inner)),
    }
}

/// Parses a comma-separated list of `lon lat` pairs.
///
/// Whitespace runs are collapsed before splitting. Pairs that do not hold
/// exactly two finite numbers are dropped; the rest keep their order.
#[must_use]
pub fn parse_coordinate_list(text: &str) -> Vec<LatLng> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.split(',').filter_map(parse_pair).collect()
}

/// Parses `POLYGON ((...))` or `MULTIPOLYGON (((...)), ...)` into rings.
///
/// Returns `None` when the text is empty, of another kind, or yields no
/// coordinates at all.
#[must_use]
pub fn parse_polygon(text: &str) -> Option<Vec<Ring>> {
    try_parse_polygon(text).ok()
}

/// Parses polygon text, reporting why it was rejected.
///
/// # Errors
///
/// Returns a [`GeometryError`] when the keyword is missing or unsupported,
/// the body wrapper is absent, or no ring survives coordinate parsing.
pub fn try_parse_polygon(text: &str) -> Result<Vec<Ring>, GeometryError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GeometryError::Empty);
    }

    // MULTIPOLYGON must be checked first: it ends with "POLYGON" too.
    if let Some(rest) = text.strip_prefix(MULTIPOLYGON) {
        return parse_multipolygon_body(rest);
    }
    if let Some(rest) = text.strip_prefix(POLYGON) {
        return parse_polygon_body(rest);
    }
    Err(GeometryError::UnsupportedKind(leading_keyword(text)))
}

fn parse_multipolygon_body(rest: &str) -> Result<Vec<Ring>, GeometryError> {
    let body = rest
        .trim_start()
        .strip_prefix("((")
        .and_then(|inner| inner.rfind("))").map(|end| &inner[..end]))
        .ok_or(GeometryError::MissingWrapper(MULTIPOLYGON))?;

    let rings: Vec<Ring> = RingScanner::scan(body)
        .iter()
        .map(|ring_text| parse_coordinate_list(ring_text))
        .filter(|ring| !ring.is_empty())
        .collect();

    if rings.is_empty() {
        return Err(GeometryError::NoCoordinates(MULTIPOLYGON));
    }
    Ok(rings)
}

fn parse_polygon_body(rest: &str) -> Result<Vec<Ring>, GeometryError> {
    let body = rest
        .trim_start()
        .strip_prefix("((")
        .and_then(|inner| inner.find("))").map(|end| &inner[..end]))
        .ok_or(GeometryError::MissingWrapper(POLYGON))?;

    let ring = parse_coordinate_list(body);
    if ring.is_empty() {
        return Err(GeometryError::NoCoordinates(POLYGON));
    }
    Ok(vec![ring])
}

fn parse_pair(raw: &str) -> Option<LatLng> {
    let mut parts = raw.trim().split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lon), Some(lat), None) => {
            Some(LatLng::from_lon_lat(parse_number(lon)?, parse_number(lat)?))
        }
        _ => None,
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Accepts `[+-]?digits[.digits]`, `[+-]?.digits` and `[+-]?digits.`.
fn parse_decimal(token: &str) -> Option<f64> {
    let unsigned = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    let mut digits = 0_usize;
    let mut points = 0_usize;
    for ch in unsigned.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }
    parse_number(token)
}

/// Byte offset of the first `keyword` not preceded by a word character.
fn find_keyword(text: &str, keyword: &str) -> Option<usize> {
    text.match_indices(keyword)
        .map(|(start, _)| start)
        .find(|&start| {
            text[..start]
                .chars()
                .next_back()
                .is_none_or(|ch| !(ch.is_alphanumeric() || ch == '_'))
        })
}

fn malformed(inner: &str) -> GeometryError {
    GeometryError::MalformedPair(inner.trim().to_owned())
}

fn leading_keyword(text: &str) -> String {
    text.chars()
        .take_while(char::is_ascii_alphabetic)
        .collect::<String>()
}
