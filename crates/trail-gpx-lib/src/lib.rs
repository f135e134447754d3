//! Trail GPX Library - Encoded Polyline to GPX Track Conversion
//!
//! This library turns the compact encoded-polyline text that mapping services use for
//! route geometry into a standalone GPX 1.1 track document.
//!
//! # Architecture
//!
//! - **[`PolylineDecoder`]**: Decodes an encoded polyline into ordered [`Coordinate`]s
//! - **[`GpxSerializer`]**: Writes a route name and coordinates as a GPX 1.1 document
//!
//! The two stages only share the coordinate sequence, so either can be used alone:
//!
//! ```
//! use trail_gpx_lib::{GpxSerializer, PolylineDecoder};
//!
//! let coordinates = PolylineDecoder::default().decode("_p~iF~ps|U").unwrap();
//! let document = GpxSerializer::default().serialize(&coordinates, "Ridge Loop");
//! assert!(document.contains(r#"<trkpt lat="38.5" lon="-120.2"/>"#));
//! ```
//!
//! Both stages are pure: no I/O, no shared state, and identical inputs always produce
//! identical outputs.

mod coordinate;
mod document;
mod polyline;
pub mod utils;

// Public API exports
pub use coordinate::Coordinate;
pub use document::{DEFAULT_CREATOR, GpxSerializer, escape_xml, serialize};
pub use polyline::{DEFAULT_PRECISION, DecoderConfig, PolylineDecoder, decode, encode};

/// Error types for the codec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed polyline at byte {index}: {reason}")]
    MalformedPolyline { index: usize, reason: String },

    #[error("Invalid precision: {0} (expected 0..={max})", max = polyline::MAX_PRECISION)]
    InvalidPrecision(i32),
}

pub type Result<T> = std::result::Result<T, CodecError>;
