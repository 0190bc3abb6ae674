// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for OBJ ingestion

use crate::AttributeKind;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that abort an ingestion
///
/// Anything not listed here (unknown directives, malformed numbers,
/// collinear polygons) is handled locally by skipping the offending line or
/// face.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A face corner references an attribute that has not been declared yet
    #[error("{kind} index {index} is out of bounds")]
    IndexOutOfBounds { kind: AttributeKind, index: i64 },

    /// Nothing survived finalization
    #[error("supplied model does not have any geometry data")]
    NoGeometry,

    /// Input bytes are not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// IO error from the input source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Create an out-of-bounds error for an index as written in the file
    pub fn out_of_bounds(kind: AttributeKind, index: i64) -> Self {
        ParseError::IndexOutOfBounds { kind, index }
    }

    /// Create an encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        ParseError::InvalidEncoding(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_messages() {
        let err = ParseError::out_of_bounds(AttributeKind::Position, 5);
        assert_eq!(err.to_string(), "Position index 5 is out of bounds");

        let err = ParseError::out_of_bounds(AttributeKind::Normal, 1);
        assert_eq!(err.to_string(), "Normal index 1 is out of bounds");

        let err = ParseError::out_of_bounds(AttributeKind::Uv, -4);
        assert_eq!(err.to_string(), "UV index -4 is out of bounds");
    }

    #[test]
    fn test_no_geometry_message() {
        assert_eq!(
            ParseError::NoGeometry.to_string(),
            "supplied model does not have any geometry data"
        );
    }
}
