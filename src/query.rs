//! Integrity and existence/type queries

use crate::{
	Archive, UstarError,
	header::{ EntryKind, Header },
	helpers::HexDump,
	scanner::{ self, Entry }
};
use std::{
	io::{ Read, Seek },
	ops::ControlFlow
};


/// Strips at most one trailing `/`
fn strip_separator(path: &str) -> &str {
	path.strip_suffix('/').unwrap_or(path)
}


impl<T: Read + Seek> Archive<T> {
	/// Verifies every record header and returns the amount of records
	///
	/// The scan aborts at the first header with an invalid magic value, version or checksum; the
	/// error's `index` is the amount of records verified before it.
	pub fn validate(&mut self) -> Result<usize, UstarError> {
		let mut count = 0;
		let outcome = scanner::for_each_entry(&mut self.cursor, |entry| {
			log::debug!("Filename: {:?}, size: {}", entry.header.path, entry.header.size);
			match Header::verify(&entry.raw) {
				Ok(()) => {
					count += 1;
					ControlFlow::Continue(())
				},
				Err(kind) => {
					log::warn!("Header #{} ({:?}) at offset {} failed verification: {}", count,
						entry.header.path, entry.offset, kind);
					log::trace!("Offending header block:\n{}", HexDump(&entry.raw));
					ControlFlow::Break((kind, entry.header.path.clone()))
				}
			}
		})?;

		match outcome {
			ControlFlow::Continue(_) => Ok(count),
			ControlFlow::Break((kind, path)) => Err(UstarError::InvalidHeader { index: count, path, kind })
		}
	}

	/// Checks whether a record named exactly `path` exists
	pub fn exists(&mut self, path: &str) -> Result<bool, UstarError> {
		self.any(|entry| entry.header.path == path)
	}

	/// Checks whether a directory record matches `path`, ignoring one trailing `/` on either side
	pub fn is_directory(&mut self, path: &str) -> Result<bool, UstarError> {
		let wanted = strip_separator(path);
		self.any(|entry| {
			entry.header.kind() == EntryKind::Directory && strip_separator(&entry.header.path) == wanted
		})
	}

	/// Checks whether a regular file record named exactly `path` exists
	pub fn is_file(&mut self, path: &str) -> Result<bool, UstarError> {
		self.any(|entry| entry.header.kind() == EntryKind::Regular && entry.header.path == path)
	}

	/// Checks whether a symlink record named exactly `path` exists
	pub fn is_symlink(&mut self, path: &str) -> Result<bool, UstarError> {
		self.any(|entry| entry.header.kind() == EntryKind::Symlink && entry.header.path == path)
	}

	/// Scans until `predicate` matches a record
	fn any(&mut self, mut predicate: impl FnMut(&Entry) -> bool) -> Result<bool, UstarError> {
		let outcome = scanner::for_each_entry(&mut self.cursor, |entry| match predicate(entry) {
			true => ControlFlow::Break(()),
			false => ControlFlow::Continue(())
		})?;
		Ok(outcome.is_break())
	}
}
