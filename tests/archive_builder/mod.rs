#![allow(dead_code)]

use std::{
	cmp::min, convert::TryFrom, error::Error,
	io::{ self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write }
};
use ustar_probe::{ Archive, EntryKind, Header, U64Ext, WriteExt, raw::BLOCK_LEN };


/// Writes `header` and `payload` to `stream`
pub fn write_next(header: &Header, payload: &[u8], mut stream: impl Write)
	-> Result<(), Box<dyn Error + 'static>>
{
	// Serialize the header and write it and the payload
	let header_raw = header.serialize()?;
	stream.write_all(&header_raw)?;
	stream.write_all(payload)?;

	// Write the padding
	let payload_len = payload.len() as u64;
	let padding_len = payload_len.ceil_to_multiple_of(BLOCK_LEN as u64) - payload_len;
	stream.try_fill(usize::try_from(padding_len)?)?;
	Ok(())
}


/// Builds an in-memory archive record by record
#[derive(Default)]
pub struct Builder {
	data: Vec<u8>
}
impl Builder {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn file(self, path: &str, payload: &[u8]) -> Self {
		self.record(Header::new(path, payload.len() as u64, EntryKind::Regular), payload)
	}
	pub fn dir(self, path: &str) -> Self {
		self.record(Header::new(path, 0, EntryKind::Directory), b"")
	}
	pub fn symlink(self, path: &str, target: &str) -> Self {
		self.record(Header::symlink(path, target), b"")
	}
	pub fn record(mut self, header: Header, payload: &[u8]) -> Self {
		write_next(&header, payload, &mut self.data).unwrap();
		self
	}
	/// Appends raw bytes (e.g. a hand-crafted header block)
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.data.extend_from_slice(bytes);
		self
	}

	/// Finishes the archive with two zero blocks
	pub fn finish(mut self) -> Vec<u8> {
		self.data.try_fill(2 * BLOCK_LEN).unwrap();
		self.data
	}
	pub fn open(self) -> Archive<Cursor<Vec<u8>>> {
		Archive::new(Cursor::new(self.finish()))
	}
}


/// The reference tree: `a`, `b`, `c/`, `c/d`, `e/`
pub fn reference() -> Builder {
	Builder::new()
		.file("a", b"first file")
		.file("b", &[b'b'; 700])
		.dir("c/")
		.file("c/d", b"nested")
		.dir("e/")
}


/// An in-memory resource that fails once its read or write budget is used up
pub struct Faulty {
	inner: Cursor<Vec<u8>>,
	reads_left: Option<usize>,
	writes_left: Option<usize>,
	fail_seeks: bool
}
impl Faulty {
	pub fn new(data: Vec<u8>) -> Self {
		Self { inner: Cursor::new(data), reads_left: None, writes_left: None, fail_seeks: false }
	}
	/// Fails every `read` call after `reads` successful ones
	pub fn fail_reads_after(mut self, reads: usize) -> Self {
		self.reads_left = Some(reads);
		self
	}
	/// Fails once `bytes` bytes have been written (the last successful write may be partial)
	pub fn fail_writes_after(mut self, bytes: usize) -> Self {
		self.writes_left = Some(bytes);
		self
	}
	/// Fails every `seek` call
	pub fn fail_seeks(mut self) -> Self {
		self.fail_seeks = true;
		self
	}
	pub fn into_inner(self) -> Vec<u8> {
		self.inner.into_inner()
	}

	fn injected() -> io::Error {
		io::Error::new(ErrorKind::Other, "injected failure")
	}
}
impl Read for Faulty {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self.reads_left.as_mut() {
			Some(0) => Err(Self::injected()),
			Some(left) => {
				*left -= 1;
				self.inner.read(buf)
			},
			None => self.inner.read(buf)
		}
	}
}
impl Write for Faulty {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		match self.writes_left.as_mut() {
			Some(0) => Err(Self::injected()),
			Some(left) => {
				let written = self.inner.write(&buf[.. min(buf.len(), *left)])?;
				*left -= written;
				Ok(written)
			},
			None => self.inner.write(buf)
		}
	}
	fn flush(&mut self) -> io::Result<()> {
		self.inner.flush()
	}
}
impl Seek for Faulty {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		match self.fail_seeks {
			true => Err(Self::injected()),
			false => self.inner.seek(pos)
		}
	}
}
