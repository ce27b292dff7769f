//! Single-line share codes carrying a complete level.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use wise_mole_core::FieldSize;

const CODE_DOMAIN: &str = "mole";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded level payload.
pub(crate) const CODE_HEADER: &str = "mole:v1";
/// Delimiter used to separate the prefix, field dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Level bytes paired with the field dimensions they describe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SharedLevel {
    /// Dimensions of the encoded field.
    pub(crate) size: FieldSize,
    /// Level text, one `\n`-terminated row per field row.
    pub(crate) bytes: Vec<u8>,
}

impl SharedLevel {
    /// Encodes the level into a string suitable for pasting into chat or a terminal.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let encoded = STANDARD_NO_PAD.encode(&self.bytes);
        format!(
            "{CODE_HEADER}:{}x{}:{encoded}",
            self.size.width(),
            self.size.height()
        )
    }

    /// Decodes a share code, checking the payload against the declared dimensions.
    pub(crate) fn decode(value: &str) -> Result<Self, ShareCodeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareCodeError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
        let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
        let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(ShareCodeError::TrailingSegments);
        }

        if domain != CODE_DOMAIN {
            return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
        }
        if version != CODE_VERSION {
            return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
        }

        let size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        check_dimensions(size, &bytes)?;

        Ok(Self { size, bytes })
    }
}

/// Errors that can occur while decoding share codes.
#[derive(Debug, Error)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("share code is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("share code is missing the version")]
    MissingVersion,
    /// The field dimensions were missing.
    #[error("share code is missing the field dimensions")]
    MissingDimensions,
    /// The payload segment was missing.
    #[error("share code is missing the payload")]
    MissingPayload,
    /// Segments followed the payload.
    #[error("share code has unexpected segments after the payload")]
    TrailingSegments,
    /// The code used an unexpected prefix segment.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The field dimensions could not be parsed.
    #[error("could not parse field dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded level does not have the declared dimensions.
    #[error("payload does not describe a {expected_width}x{expected_height} field")]
    DimensionMismatch {
        /// Declared number of columns.
        expected_width: u32,
        /// Declared number of rows.
        expected_height: u32,
    },
}

fn parse_dimensions(dimensions: &str) -> Result<FieldSize, ShareCodeError> {
    let invalid = || ShareCodeError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || rows == 0 {
        return Err(invalid());
    }

    Ok(FieldSize::new(columns, rows))
}

fn check_dimensions(size: FieldSize, bytes: &[u8]) -> Result<(), ShareCodeError> {
    let mismatch = ShareCodeError::DimensionMismatch {
        expected_width: size.width(),
        expected_height: size.height(),
    };
    let width = usize::try_from(size.width()).unwrap_or(usize::MAX);
    let rows: Vec<&[u8]> = bytes
        .strip_suffix(b"\n")
        .unwrap_or(bytes)
        .split(|byte| *byte == b'\n')
        .collect();

    let height_matches = u32::try_from(rows.len()).is_ok_and(|rows| rows == size.height());
    if !height_matches || rows.iter().any(|row| row.len() != width) {
        return Err(mismatch);
    }
    Ok(())
}
