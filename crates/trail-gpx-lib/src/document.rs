//! GPX 1.1 document serialization
//!
//! Writes a single track with a single segment. Coordinates are printed with the
//! shortest decimal text that parses back to the same `f64`.

use crate::Coordinate;
use std::borrow::Cow;
use std::fmt::Write;

/// Value of the `creator` attribute unless configured otherwise
pub const DEFAULT_CREATOR: &str = "trail-gpx";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_SCHEMA_LOCATION: &str =
    "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Approximate length of one `<trkpt .../>` line, used to pre-size the output
const TRKPT_LINE_LEN: usize = 48;

/// Serializes coordinate sequences as GPX 1.1 track documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpxSerializer {
    /// Text written to the root element's `creator` attribute
    pub creator: String,
}

impl Default for GpxSerializer {
    fn default() -> Self {
        Self {
            creator: DEFAULT_CREATOR.to_string(),
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl GpxSerializer {
    /// Create a serializer that stamps documents with the given creator
    pub fn new(creator: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
        }
    }

    /// Build a complete GPX document for one track
    ///
    /// # Arguments
    /// * `coordinates` - Track points in path order (may be empty)
    /// * `route_name` - Track name, escaped before insertion
    ///
    /// # Returns
    /// The document text, always ending with a newline
    pub fn serialize(&self, coordinates: &[Coordinate], route_name: &str) -> String {
        #[cfg(feature = "profiling")]
        profiling::scope!("document::serialize");

        let mut out = String::with_capacity(512 + coordinates.len() * TRKPT_LINE_LEN);

        // Writing into a String never fails
        let _ = writeln!(out, "{XML_DECLARATION}");
        let _ = writeln!(
            out,
            r#"<gpx version="1.1" creator="{}" xmlns="{GPX_NAMESPACE}" xmlns:xsi="{XSI_NAMESPACE}" xsi:schemaLocation="{GPX_SCHEMA_LOCATION}">"#,
            escape_xml(&self.creator)
        );
        out.push_str("  <trk>\n");
        let _ = writeln!(out, "    <name>{}</name>", escape_xml(route_name));
        out.push_str("    <trkseg>\n");
        for c in coordinates {
            let _ = writeln!(out, r#"      <trkpt lat="{}" lon="{}"/>"#, c.lat, c.lon);
        }
        out.push_str("    </trkseg>\n");
        out.push_str("  </trk>\n");
        out.push_str("</gpx>\n");

        tracing::debug!(
            "Serialized {} track points into {} bytes",
            coordinates.len(),
            out.len()
        );
        out
    }
}

/// Serialize with the default creator
pub fn serialize(coordinates: &[Coordinate], route_name: &str) -> String {
    GpxSerializer::default().serialize(coordinates, route_name)
}

/// Escape the five XML special characters in a single pass
///
/// Returns the input unchanged (borrowed) when there is nothing to escape.
pub fn escape_xml(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
