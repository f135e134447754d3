//! Encoded polyline decoding
//!
//! The encoded polyline format stores a track as latitude/longitude deltas. Each delta is
//! zig-zag mapped to an unsigned integer and split into 5-bit chunks, least significant
//! first. A chunk is written as one printable ASCII character (`chunk + 63`), with the
//! `0x20` bit set on every chunk except the last one of the integer.

use crate::{CodecError, Coordinate, Result};

/// Precision used by Google's polyline format (five decimal digits)
pub const DEFAULT_PRECISION: i32 = 5;

/// Largest precision whose scaling factor is still a finite `f64`
pub(crate) const MAX_PRECISION: i32 = 308;

/// Offset added to every chunk so it lands in the printable ASCII range
const CHAR_OFFSET: u8 = 63;
/// Last character of the alphabet (`'~'`)
const CHAR_MAX: u8 = CHAR_OFFSET + 63;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u8 = 0x1f;
const CONTINUATION_BIT: u8 = 0x20;

/// Configuration for the polyline decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Number of decimal digits stored per coordinate component.
    /// The decoded integers are divided by `10^precision`.
    /// Default: 5
    pub precision: i32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Decodes encoded polylines with a fixed, validated precision
#[derive(Debug, Clone, Copy)]
pub struct PolylineDecoder {
    precision: u32,
    factor: f64,
}

impl Default for PolylineDecoder {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION as u32,
            factor: 10f64.powi(DEFAULT_PRECISION),
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl PolylineDecoder {
    /// Create a decoder for the given configuration
    ///
    /// # Returns
    /// The decoder, or [`CodecError::InvalidPrecision`] if the precision is negative or too
    /// large for its scaling factor to be represented
    pub fn new(config: DecoderConfig) -> Result<Self> {
        let factor = scaling_factor(config.precision)?;
        Ok(Self {
            precision: config.precision as u32,
            factor,
        })
    }

    /// The number of decimal digits this decoder divides by
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Decode an encoded polyline into coordinates in path order
    ///
    /// Empty input decodes to an empty sequence. Input that stops in the middle of an
    /// integer, stops between a latitude and its longitude, or contains characters
    /// outside the `'?'..='~'` alphabet is rejected as a whole.
    pub fn decode(&self, encoded: &str) -> Result<Vec<Coordinate>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("polyline::decode");

        let bytes = encoded.as_bytes();
        // Every coordinate takes at least two characters
        let mut coordinates = Vec::with_capacity(bytes.len() / 2);
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;

        while index < bytes.len() {
            let delta_lat = read_delta(bytes, &mut index)?;
            if index == bytes.len() {
                return Err(malformed(index, "missing longitude delta after latitude"));
            }
            let delta_lng = read_delta(bytes, &mut index)?;

            lat = lat
                .checked_add(delta_lat)
                .ok_or_else(|| malformed(index, "latitude accumulator overflow"))?;
            lng = lng
                .checked_add(delta_lng)
                .ok_or_else(|| malformed(index, "longitude accumulator overflow"))?;

            coordinates.push(Coordinate::new(
                lng as f64 / self.factor,
                lat as f64 / self.factor,
            ));
        }

        tracing::debug!(
            "Decoded {} coordinates from {} characters (precision {})",
            coordinates.len(),
            bytes.len(),
            self.precision
        );
        Ok(coordinates)
    }
}

/// Decode an encoded polyline at the given precision
///
/// Shorthand for [`PolylineDecoder::new`] followed by [`PolylineDecoder::decode`].
pub fn decode(encoded: &str, precision: i32) -> Result<Vec<Coordinate>> {
    PolylineDecoder::new(DecoderConfig { precision })?.decode(encoded)
}

/// Encode coordinates with the standard polyline algorithm
///
/// Components are rounded to the nearest `10^-precision`. Values beyond the `i64` range
/// after scaling saturate.
pub fn encode(coordinates: &[Coordinate], precision: i32) -> Result<String> {
    let factor = scaling_factor(precision)?;
    let mut encoded = String::with_capacity(coordinates.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for coordinate in coordinates {
        let lat = (coordinate.lat * factor).round() as i64;
        let lng = (coordinate.lon * factor).round() as i64;
        push_delta(lat.saturating_sub(prev_lat), &mut encoded);
        push_delta(lng.saturating_sub(prev_lng), &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(encoded)
}

fn scaling_factor(precision: i32) -> Result<f64> {
    if !(0..=MAX_PRECISION).contains(&precision) {
        return Err(CodecError::InvalidPrecision(precision));
    }
    Ok(10f64.powi(precision))
}

fn malformed(index: usize, reason: &str) -> CodecError {
    CodecError::MalformedPolyline {
        index,
        reason: reason.to_string(),
    }
}

/// Read one variable-length integer starting at `index` and undo the zig-zag mapping
///
/// On success `index` points at the first character after the integer.
#[inline]
fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(malformed(*index, "unterminated variable-length integer"));
        };
        if !(CHAR_OFFSET..=CHAR_MAX).contains(&byte) {
            return Err(malformed(*index, "character outside the polyline alphabet"));
        }

        let chunk = byte - CHAR_OFFSET;
        let bits = chunk & CHUNK_MASK;
        // The 13th chunk only has room for the top four bits of a u64
        if shift > 60 || (shift == 60 && bits > 0x0f) {
            return Err(malformed(*index, "variable-length integer exceeds 64 bits"));
        }
        value |= u64::from(bits) << shift;
        shift += CHUNK_BITS;
        *index += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    let half = (value >> 1) as i64;
    Ok(if value & 1 == 1 { -half - 1 } else { half })
}

/// Zig-zag map a delta and append its chunks
#[inline]
fn push_delta(delta: i64, out: &mut String) {
    let mut value = if delta < 0 {
        (((!delta) as u64) << 1) | 1
    } else {
        (delta as u64) << 1
    };

    while value >= u64::from(CONTINUATION_BIT) {
        let chunk = (value as u8 & CHUNK_MASK) | CONTINUATION_BIT;
        out.push(char::from(chunk + CHAR_OFFSET));
        value >>= CHUNK_BITS;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}
