//! Sequential traversal of the records in an archive

use crate::{
	UstarError,
	cursor::BlockCursor,
	header::{ Header, raw }
};
use std::{
	io::{ Read, Seek },
	ops::ControlFlow
};


/// A scanned record
#[derive(Debug, Clone)]
pub struct Entry {
	/// The decoded header
	pub header: Header,
	/// The raw header block
	pub raw: raw::header::Raw,
	/// The byte offset of the header block
	pub offset: u64,
	/// The amount of data blocks following the header
	pub data_blocks: u64
}


/// An iterator over the records of an archive, starting at the first block
///
/// After each header the cursor is advanced past the record's data region, regardless of what
/// the consumer does with the entry. Iteration stops at the first terminal block or at the end
/// of the input.
pub struct Entries<'a, T> {
	cursor: &'a mut BlockCursor<T>,
	end: Option<u64>,
	failed: bool
}
impl<'a, T: Read + Seek> Entries<'a, T> {
	/// Rewinds `cursor` and starts a new traversal
	pub fn new(cursor: &'a mut BlockCursor<T>) -> Result<Self, UstarError> {
		cursor.seek_to_start()?;
		Ok(Self { cursor, end: None, failed: false })
	}

	/// The byte offset of the end-of-archive marker once the traversal is complete
	///
	/// _Note: if the archive lacks a terminator, this is the offset where the input ended_
	pub fn end(&self) -> Option<u64> {
		self.end
	}

	/// Reads the next record or the end of the archive
	fn step(&mut self) -> Result<Step, UstarError> {
		let offset = self.cursor.position();
		let raw = match self.cursor.read_block()? {
			Some(raw) if Header::is_terminal(&raw) => return Ok(Step::End(offset)),
			Some(raw) => raw,
			None => {
				log::warn!("Archive ends at offset {} without an end-of-archive marker", offset);
				return Ok(Step::End(self.cursor.position()));
			}
		};

		let header = Header::parse(&raw);
		let data_blocks = BlockCursor::<T>::blocks_for(header.size);
		self.cursor.skip_data(header.size)?;
		Ok(Step::Entry(Entry { header, raw, offset, data_blocks }))
	}
}
impl<T: Read + Seek> Iterator for Entries<'_, T> {
	type Item = Result<Entry, UstarError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.end.is_some() || self.failed {
			return None;
		}
		match self.step() {
			Ok(Step::Entry(entry)) => Some(Ok(entry)),
			Ok(Step::End(end)) => {
				self.end = Some(end);
				None
			},
			Err(e) => {
				self.failed = true;
				Some(Err(e))
			}
		}
	}
}


/// One traversal step
enum Step {
	Entry(Entry),
	End(u64)
}


/// Visits every record from the start of the archive until `visit` breaks or the end-of-archive
/// marker is reached
///
/// Returns `Continue(end)` with the byte offset of the end-of-archive marker if the scan ran to
/// completion, or the value `visit` broke with.
pub fn for_each_entry<T, B, F>(cursor: &mut BlockCursor<T>, mut visit: F)
	-> Result<ControlFlow<B, u64>, UstarError> where T: Read + Seek, F: FnMut(&Entry) -> ControlFlow<B>
{
	let mut entries = Entries::new(cursor)?;
	loop {
		match entries.step()? {
			Step::Entry(entry) => if let ControlFlow::Break(value) = visit(&entry) {
				return Ok(ControlFlow::Break(value));
			},
			Step::End(end) => return Ok(ControlFlow::Continue(end))
		}
	}
}
