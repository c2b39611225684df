//! Block-granular access to a seekable archive resource

use crate::{
	UstarError,
	header::raw::{ self, BLOCK_LEN },
	helpers::{ ReadExt, WriteExt, U64Ext }
};
use std::io::{ Read, Seek, SeekFrom, Write };


/// A cursor over an archive viewed as an array of 512 byte blocks
#[derive(Debug)]
pub struct BlockCursor<T> {
	inner: T,
	pos: u64
}
impl<T> BlockCursor<T> {
	/// Wraps `inner`; the position is unknown until the first seek
	pub fn new(inner: T) -> Self {
		Self { inner, pos: 0 }
	}
	/// The current byte offset
	pub fn position(&self) -> u64 {
		self.pos
	}
	/// Returns the wrapped resource
	pub fn into_inner(self) -> T {
		self.inner
	}
	/// The amount of data blocks that a payload of `byte_len` bytes occupies
	pub fn blocks_for(byte_len: u64) -> u64 {
		byte_len.ceil_to_multiple_of(BLOCK_LEN as u64) / BLOCK_LEN as u64
	}
}
impl<T: Seek> BlockCursor<T> {
	/// Repositions to byte 0
	pub fn seek_to_start(&mut self) -> Result<(), UstarError> {
		self.seek_to(0)
	}
	/// Repositions to the absolute byte offset `offset`
	pub fn seek_to(&mut self, offset: u64) -> Result<(), UstarError> {
		self.pos = self.inner.seek(SeekFrom::Start(offset))?;
		Ok(())
	}
	/// Skips the data region of a record with `byte_len` payload bytes
	pub fn skip_data(&mut self, byte_len: u64) -> Result<(), UstarError> {
		let skip = Self::blocks_for(byte_len) * BLOCK_LEN as u64;
		let target = self.pos.checked_add(skip)
			.ok_or(UstarError::ApiMisuse("Data region exceeds the addressable range"))?;
		self.seek_to(target)
	}
}
impl<T: Read + Seek> BlockCursor<T> {
	/// Reads exactly one block
	///
	/// _Note: if fewer than 512 bytes are available, `None` is returned and the cursor is rewound
	/// to the start of the partial block_
	pub fn read_block(&mut self) -> Result<Option<raw::header::Raw>, UstarError> {
		let mut block = raw::header::raw();
		let start = self.pos;
		match self.inner.read_up_to(&mut block)? {
			BLOCK_LEN => {
				self.pos += BLOCK_LEN as u64;
				Ok(Some(block))
			},
			0 => Ok(None),
			_ => {
				self.seek_to(start)?;
				Ok(None)
			}
		}
	}
}
impl<T: Write + Seek> BlockCursor<T> {
	/// Writes one block at the current position
	pub fn write_block(&mut self, block: &raw::header::Raw) -> Result<(), UstarError> {
		self.write_all(block)
	}
	/// Writes `data` at the current position
	pub fn write_all(&mut self, data: &[u8]) -> Result<(), UstarError> {
		self.inner.write_all(data)?;
		self.pos += data.len() as u64;
		Ok(())
	}
	/// Writes zero bytes to pad a payload of `byte_len` bytes to the next block boundary
	pub fn write_padding(&mut self, byte_len: u64) -> Result<(), UstarError> {
		let padding = byte_len.ceil_to_multiple_of(BLOCK_LEN as u64) - byte_len;
		self.write_zeros(padding as usize)
	}
	/// Writes `len` zero bytes
	pub fn write_zeros(&mut self, len: usize) -> Result<(), UstarError> {
		self.inner.try_fill(len)?;
		self.pos += len as u64;
		Ok(())
	}
	/// Flushes the underlying resource
	pub fn flush(&mut self) -> Result<(), UstarError> {
		Ok(self.inner.flush()?)
	}
}
