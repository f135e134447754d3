use crate::output::{OutputTarget, write_document};
use crate::source::{TrailData, extract_trail, read_input};
use crate::{Result, Settings};
use std::path::PathBuf;
use trail_gpx_lib::{GpxSerializer, PolylineDecoder, utils};

/// Outcome of a conversion
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Track name written to the document
    pub route_name: String,
    /// Number of track points
    pub points: usize,
    /// Track length in meters
    pub length_meters: f64,
    /// File written, or `None` for stdout
    pub written_to: Option<PathBuf>,
}

/// Convert one trail into a GPX document and save it
///
/// Nothing is written unless decoding succeeds.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    // Reject a bad precision before touching the input
    let decoder = PolylineDecoder::new(settings.decoder_config())?;
    let serializer = GpxSerializer::new(settings.creator.as_str());

    let trail = load_trail(settings)?;
    let coordinates = decoder.decode(&trail.encoded)?;

    let length_meters = utils::track_length_meters(&coordinates);
    tracing::info!(
        "Decoded \"{}\": {} points, {:.2} km",
        trail.name,
        coordinates.len(),
        length_meters / 1000.0
    );
    if coordinates.iter().any(|c| !c.is_valid_wgs84()) {
        tracing::warn!(
            "Some points fall outside WGS84 ranges, check the precision (currently {})",
            decoder.precision()
        );
    }

    let document = serializer.serialize(&coordinates, &trail.name);
    let target = OutputTarget::from_arg(settings.output.as_deref());
    let written_to = write_document(&document, &trail.name, &target)?;
    if let Some(path) = &written_to {
        tracing::info!("Saved GPX track to {}", path.display());
    }

    Ok(RunSummary {
        route_name: trail.name,
        points: coordinates.len(),
        length_meters,
        written_to,
    })
}

/// Obtain the encoded route and name, from the command line or from the payload
fn load_trail(settings: &Settings) -> Result<TrailData> {
    let mut trail = match &settings.polyline {
        Some(encoded) => TrailData {
            name: settings.default_name.clone(),
            encoded: encoded.clone(),
        },
        None => {
            let json = read_input(settings.input.as_deref())?;
            extract_trail(&json, &settings.default_name)?
        }
    };
    if let Some(name) = &settings.name {
        trail.name = name.clone();
    }
    Ok(trail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use trail_gpx_lib::CodecError;

    const CLASSIC: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn test_run_polyline_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            polyline: Some(CLASSIC.to_string()),
            name: Some("Sierra <Crossing>".to_string()),
            output: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };

        let summary = run(&settings).unwrap();

        assert_eq!(summary.route_name, "Sierra <Crossing>");
        assert_eq!(summary.points, 3);
        assert!(summary.length_meters > 100_000.0);

        let path = summary.written_to.unwrap();
        assert_eq!(path, dir.path().join("Sierra _Crossing_.gpx"));
        let document = std::fs::read_to_string(path).unwrap();
        assert!(document.contains("<name>Sierra &lt;Crossing&gt;</name>"));
        assert!(document.contains(r#"<trkpt lat="38.5" lon="-120.2"/>"#));
        assert!(document.contains(r#"creator="trail-gpx""#));
    }

    #[test]
    fn test_run_payload_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trail.json");
        std::fs::write(
            &input,
            r#"{"trails":[{"name":"Mission Peak","defaultMap":{"routes":[{"lineSegments":[{"polyline":{"pointsData":"_p~iF~ps|U"}}]}]}}]}"#,
        )
        .unwrap();
        let output = dir.path().join("out.gpx");
        let settings = Settings {
            input: Some(input),
            output: Some(output.clone()),
            creator: "tests".to_string(),
            ..Settings::default()
        };

        let summary = run(&settings).unwrap();

        assert_eq!(summary.route_name, "Mission Peak");
        assert_eq!(summary.points, 1);
        assert_eq!(summary.written_to, Some(output.clone()));
        let document = std::fs::read_to_string(output).unwrap();
        assert!(document.contains("<name>Mission Peak</name>"));
        assert!(document.contains(r#"creator="tests""#));
    }

    #[test]
    fn test_run_uses_default_name_for_bare_polyline() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            polyline: Some("??".to_string()),
            output: Some(dir.path().to_path_buf()),
            ..Settings::default()
        };

        let summary = run(&settings).unwrap();
        assert_eq!(summary.route_name, "Trail Route");
        assert_eq!(summary.written_to, Some(dir.path().join("Trail Route.gpx")));
    }

    #[test]
    fn test_run_malformed_polyline_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("broken.gpx");
        let settings = Settings {
            polyline: Some(format!("{CLASSIC}_")),
            output: Some(output.clone()),
            ..Settings::default()
        };

        let err = run(&settings).unwrap_err();
        assert!(matches!(
            err,
            AppError::Codec(CodecError::MalformedPolyline { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_invalid_precision() {
        let settings = Settings {
            polyline: Some(CLASSIC.to_string()),
            precision: -3,
            ..Settings::default()
        };

        let err = run(&settings).unwrap_err();
        assert!(matches!(
            err,
            AppError::Codec(CodecError::InvalidPrecision(-3))
        ));
    }
}
