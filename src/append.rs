//! Appending regular files at the end of an archive

use crate::{
	Archive, UstarError,
	header::{ EntryKind, Header, raw::BLOCK_LEN },
	scanner
};
use std::{
	convert::Infallible,
	io::{ Read, Seek, Write },
	ops::ControlFlow
};


impl<T: Read + Write + Seek> Archive<T> {
	/// Appends a regular file record named `name` with `payload` as content
	///
	/// The record replaces the old end-of-archive marker and is followed by two fresh zero blocks.
	/// Nothing is written if a record named `name` already exists.
	///
	/// _Note: appending is not transactional; if a write fails halfway, the archive may be left in
	/// an inconsistent state and should be validated before further use_
	pub fn append(&mut self, name: &str, payload: &[u8]) -> Result<(), UstarError> {
		if self.exists(name)? {
			Err(UstarError::AlreadyExists(name.to_string()))?
		}

		// Encode first so that an unencodable name fails before anything is written
		let size = payload.len() as u64;
		let header = Header { mode: Some(u64::from(self.options.file_mode)),
			..Header::new(name, size, EntryKind::Regular) };
		let header_raw = header.serialize()?;

		// Locate the end-of-archive marker and overwrite it
		let end = match scanner::for_each_entry(&mut self.cursor, |_| ControlFlow::<Infallible>::Continue(()))? {
			ControlFlow::Continue(end) => end,
			ControlFlow::Break(never) => match never {}
		};
		self.cursor.seek_to(end)?;

		self.cursor.write_block(&header_raw)?;
		self.cursor.write_all(payload)?;
		self.cursor.write_padding(size)?;
		self.cursor.write_zeros(2 * BLOCK_LEN)?;
		self.cursor.flush()?;

		log::info!("Appended {:?} ({} bytes) at offset {}", name, size, end);
		Ok(())
	}
}
