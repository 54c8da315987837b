//! Wind unit and direction conversions.

/// 16-point compass, clockwise from north.
pub const CARDINAL_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const BUCKET_WIDTH_DEG: f64 = 22.5;

/// Bucket a degree bearing into the 16-point compass.
///
/// The bearing is normalized into [0, 360) first, so negative and
/// over-rotated inputs land in the same bucket as their canonical angle.
pub fn cardinal_from_degrees(degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / BUCKET_WIDTH_DEG) as usize;
    CARDINAL_DIRECTIONS[index.min(CARDINAL_DIRECTIONS.len() - 1)]
}

pub fn mps_to_kph(mps: f64) -> f64 {
    mps * 3.6
}
