//! ## About
//! This crate inspects and extends classic __USTAR__ archives in place: it validates the record
//! headers, answers existence and type queries, lists directories (following symlink records)
//! and appends regular files without breaking the end-of-archive marker.
//!
//! _Note: It works on the fixed 100 byte name/octal field USTAR layout only; GNU/PAX extensions,
//! compression and extraction are out of scope – for a high-level solution, take a look at_
//! [`tar`](https://crates.io/crates/tar)
//!
//! An archive is a sequence of 512 byte blocks: each record is a header block followed by its
//! payload, padded to the block size. The archive ends at the first header whose name starts
//! with a NUL byte. There is no index, so every operation rescans the archive from the start.
//!
//! ## Example
//! ```
//! # use std::{ error::Error, io::Cursor };
//! use ustar_probe::{ Archive, ListStatus, raw::BLOCK_LEN };
//!
//! # fn main() -> Result<(), Box<dyn Error + 'static>> {
//! // Start with an empty archive (just the end-of-archive marker)
//! let mut archive = Archive::new(Cursor::new(vec![0; 2 * BLOCK_LEN]));
//! archive.append("hello.txt", b"Hello world")?;
//!
//! assert_eq!(archive.validate()?, 1);
//! assert!(archive.is_file("hello.txt")?);
//!
//! let listing = archive.list(None, 10)?;
//! assert_eq!(listing.status, ListStatus::Found);
//! assert_eq!(listing.children, vec!["hello.txt".to_string()]);
//! # Ok(())
//! # }
//! ```

mod append;
mod archive;
mod cursor;
mod header;
mod helpers;
mod query;
mod resolve;
mod scanner;
mod status;

pub use crate::{
	archive::{ Archive, ArchiveOptions },
	cursor::BlockCursor,
	header::{ encode, EntryKind, FormatError, Header, raw },
	helpers::{ HexDump, ReadExt, WriteExt, U64Ext },
	resolve::{ Children, ListStatus, Listing },
	scanner::{ for_each_entry, Entries, Entry },
	status::{ StatusCode, VALIDATE_FAILED }
};


/// An `ustar_probe`-related error
#[derive(Debug, thiserror::Error)]
pub enum UstarError {
	/// The underlying resource failed to read, seek or write
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// A record header failed verification
	#[error("Header #{index} ({path:?}) is invalid: {kind}")]
	InvalidHeader {
		/// The amount of records verified before the invalid one
		index: usize,
		/// The path stored in the invalid header
		path: String,
		/// What is wrong with the header
		kind: FormatError
	},
	/// A record with the given name already exists
	#[error("A record named {0:?} already exists")]
	AlreadyExists(String),
	/// Symlink resolution ran into a cycle or exceeded the configured hop limit
	#[error("Symlink cycle while resolving {path:?} (after {hops} hops)")]
	SymlinkCycle {
		/// The path whose resolution failed
		path: String,
		/// The amount of substitutions performed
		hops: usize
	},
	/// An API misuse occurred (e.g. a value cannot be encoded into a header field)
	#[error("API misuse: {0}")]
	ApiMisuse(&'static str)
}
