//! Trail API payload handling
//!
//! Only the parts of the response needed for a track are modelled; everything else in
//! the payload is ignored.

use crate::{AppError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Location of the encoded route inside the payload, for error messages
pub const POLYLINE_PATH: &str = "trails[0].defaultMap.routes[0].lineSegments[0].polyline.pointsData";

/// Route data pulled out of a trail API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailData {
    /// Display name of the trail
    pub name: String,
    /// Encoded polyline of the first line segment of the default route
    pub encoded: String,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    trails: Vec<Trail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Trail {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    default_map: Option<DefaultMap>,
}

#[derive(Debug, Deserialize)]
struct DefaultMap {
    #[serde(default)]
    routes: Vec<MapRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapRoute {
    #[serde(default)]
    line_segments: Vec<LineSegment>,
}

#[derive(Debug, Deserialize)]
struct LineSegment {
    #[serde(default)]
    polyline: Option<EncodedLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncodedLine {
    #[serde(default)]
    points_data: Option<String>,
}

/// Read the whole input as text, from a file or from stdin when `input` is `None` or `-`
pub fn read_input(input: Option<&Path>) -> Result<String> {
    let mut contents = String::new();
    match input {
        None => {
            std::io::stdin().read_to_string(&mut contents)?;
        }
        Some(path) if path == Path::new("-") => {
            std::io::stdin().read_to_string(&mut contents)?;
        }
        Some(path) => {
            contents = std::fs::read_to_string(path).map_err(|source| AppError::File {
                action: "read",
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    tracing::debug!("Read {} bytes of input", contents.len());
    Ok(contents)
}

/// Extract the encoded route and trail name from a trail API response
///
/// A missing, null or blank name falls back to `default_name`.
pub fn extract_trail(json: &str, default_name: &str) -> Result<TrailData> {
    let payload: Payload = serde_json::from_str(json)?;
    let trail = payload
        .trails
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Payload("response contains no trails".to_string()))?;

    let encoded = trail
        .default_map
        .and_then(|map| map.routes.into_iter().next())
        .and_then(|route| route.line_segments.into_iter().next())
        .and_then(|segment| segment.polyline)
        .and_then(|line| line.points_data)
        .ok_or_else(|| AppError::Payload(format!("polyline data not found at {POLYLINE_PATH}")))?;

    let name = match trail.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            tracing::warn!("Trail has no name, using \"{default_name}\"");
            default_name.to_string()
        }
    };

    Ok(TrailData { name, encoded })
}
