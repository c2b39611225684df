//! Numeric status codes of the classic C-style interface
//!
//! Every operation has its own code table, so the codes are derived from the operation's result
//! type rather than from the error alone.

use crate::{ FormatError, Listing, UstarError };
use std::convert::TryFrom;


/// The code `validate` reports for failures that are not header errors (e.g. I/O errors)
pub const VALIDATE_FAILED: i32 = -4;


/// Converts an operation result into its numeric status
pub trait StatusCode {
	/// The numeric status of `self`
	fn status_code(&self) -> i32;
}

/// `validate`: the record count on success; `-1` magic, `-2` version, `-3` checksum and
/// [`VALIDATE_FAILED`] for everything else
impl StatusCode for Result<usize, UstarError> {
	fn status_code(&self) -> i32 {
		match self {
			Ok(count) => i32::try_from(*count).unwrap_or(i32::MAX),
			Err(UstarError::InvalidHeader { kind: FormatError::MagicMismatch, .. }) => -1,
			Err(UstarError::InvalidHeader { kind: FormatError::VersionMismatch, .. }) => -2,
			Err(UstarError::InvalidHeader { kind: FormatError::ChecksumMismatch { .. }, .. }) => -3,
			Err(_) => VALIDATE_FAILED
		}
	}
}

/// `list`: `0` missing, `1` found, `-1` on any failure
impl StatusCode for Result<Listing, UstarError> {
	fn status_code(&self) -> i32 {
		match self {
			Ok(listing) => listing.status.code(),
			Err(_) => -1
		}
	}
}

/// `append`: `0` on success, `-1` if the record already exists, `-2` on any other failure
impl StatusCode for Result<(), UstarError> {
	fn status_code(&self) -> i32 {
		match self {
			Ok(()) => 0,
			Err(UstarError::AlreadyExists(_)) => -1,
			Err(_) => -2
		}
	}
}
