//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: sampler error (bad config, unsampleable area)
//! - 11: I/O error (writing JSON or SVG output)
//! - 12: input error (bad JSON in --params or --field, bad color)
//! - 13: serialization error
//! - 14: the sampler skipped the frame

use showfields_core::SamplerError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A sampler-level error (invalid config, zero-sized area).
    Sampler(SamplerError),
    /// An I/O error (file write).
    Io(String),
    /// A user input error (malformed JSON arguments, bad color).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
    /// Refresh ran but produced no frame.
    NoFrame(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sampler(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::NoFrame(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sampler(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
            CliError::NoFrame(msg) => write!(f, "no frame rendered: {msg}"),
        }
    }
}

impl From<SamplerError> for CliError {
    fn from(e: SamplerError) -> Self {
        match e {
            SamplerError::InvalidColor(msg) => CliError::Input(msg),
            other => CliError::Sampler(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampler_error_exit_code_is_10() {
        let err = CliError::Sampler(SamplerError::InvalidSampleCount(0));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad field".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn no_frame_exit_code_is_14() {
        let err = CliError::NoFrame("Unbound".into());
        assert_eq!(err.exit_code(), 14);
        assert!(err.to_string().contains("Unbound"));
    }

    #[test]
    fn from_sampler_color_error_routes_to_input() {
        let cli_err = CliError::from(SamplerError::InvalidColor("bad hex".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("bad hex"));
    }

    #[test]
    fn from_sampler_error_routes_to_sampler() {
        let cli_err = CliError::from(SamplerError::InvalidDimensions {
            width: 0.0,
            height: 900.0,
        });
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("900"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }

    #[test]
    fn from_io_error_routes_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let cli_err = CliError::from(io);
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("no such dir"));
    }
}
