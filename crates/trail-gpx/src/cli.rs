use clap::Parser;
use std::path::PathBuf;
use trail_gpx_lib::{DEFAULT_CREATOR, DEFAULT_PRECISION, DecoderConfig};

/// Name used when neither the payload nor the command line provides one
pub const DEFAULT_ROUTE_NAME: &str = "Trail Route";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Trail GPX - Convert the encoded route of a trail API response into a GPX 1.1 track
pub struct Settings {
    /// Trail API JSON response to read ("-" or omitted reads stdin)
    #[clap(short, long, value_name = "FILE", conflicts_with = "polyline")]
    pub input: Option<PathBuf>,

    /// Where to write the GPX document: a file, a directory, or "-" for stdout
    #[clap(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Decode this encoded polyline instead of reading a JSON response
    #[clap(short, long, value_name = "ENCODED")]
    pub polyline: Option<String>,

    /// Track name to use instead of the one found in the response
    #[clap(short, long)]
    pub name: Option<String>,

    /// Decimal digits stored per coordinate component in the encoded polyline
    #[clap(long, default_value_t = DEFAULT_PRECISION, env = "TRAIL_GPX_PRECISION", allow_negative_numbers = true)]
    pub precision: i32,

    /// Value of the creator attribute in the GPX document
    #[clap(long, default_value = DEFAULT_CREATOR)]
    pub creator: String,

    /// Track name used when the response does not carry one
    #[clap(long, default_value = DEFAULT_ROUTE_NAME)]
    pub default_name: String,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage help on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Decoder configuration derived from these settings
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            precision: self.precision,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            polyline: None,
            name: None,
            precision: DEFAULT_PRECISION,
            creator: DEFAULT_CREATOR.to_string(),
            default_name: DEFAULT_ROUTE_NAME.to_string(),
        }
    }
}
