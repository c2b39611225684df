use std::{
	cmp::min,
	fmt::{ self, Display, Formatter },
	io::{ self, Read, Write, ErrorKind::{ Interrupted, WriteZero } }
};


/// An extension for `Read`
pub trait ReadExt {
	/// Reads into `buf` until it is full or the end of the stream is reached and returns the
	/// amount of bytes read
	///
	/// _Note: This function behaves like `read_exact`, except that hitting the end of the stream
	/// is not an error; `Interrupted` reads are retried_
	fn read_up_to(&mut self, buf: &mut[u8]) -> Result<usize, io::Error>;
}
impl<T: Read> ReadExt for T {
	fn read_up_to(&mut self, buf: &mut[u8]) -> Result<usize, io::Error> {
		let mut filled = 0;
		'read_loop: while filled < buf.len() {
			match self.read(&mut buf[filled..]) {
				Err(ref e) if e.kind() == Interrupted => continue 'read_loop,
				Err(e) => Err(e)?,
				Ok(0) => break 'read_loop,
				Ok(len) => filled += len
			}
		}
		Ok(filled)
	}
}


/// An extension for `Write`
pub trait WriteExt {
	/// Writes `len` zero bytes
	fn try_fill(&mut self, len: usize) -> Result<(), io::Error>;
}
impl<T: Write> WriteExt for T {
	fn try_fill(&mut self, mut len: usize) -> Result<(), io::Error> {
		while len > 0 {
			let buf = &[0; 4096][.. min(len, 4096)];
			match self.write(buf) {
				Err(ref e) if e.kind() == Interrupted => continue,
				Err(e) => Err(e)?,
				Ok(0) => Err(io::Error::from(WriteZero))?,
				Ok(written) => len -= written
			}
		}
		Ok(())
	}
}


/// An extension for `u64`
pub trait U64Ext {
	/// Ceils `self` to an integer multiple of `num`
	fn ceil_to_multiple_of(&self, num: Self) -> Self;
}
impl U64Ext for u64 {
	fn ceil_to_multiple_of(&self, num: Self) -> Self {
		match *self % num {
			0 => *self,
			r => *self + (num - r)
		}
	}
}


/// Renders bytes as a classic hex dump (offset, 16 hex bytes, printable characters)
pub struct HexDump<'a>(pub &'a [u8]);
impl Display for HexDump<'_> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		for (row, chunk) in self.0.chunks(16).enumerate() {
			write!(f, "{:04x}:  ", row * 16)?;
			for byte in chunk {
				write!(f, "{:02x} ", byte)?;
			}
			for _ in chunk.len()..16 {
				write!(f, "   ")?;
			}
			write!(f, " ")?;
			for byte in chunk {
				let c = match byte.is_ascii_graphic() || *byte == b' ' {
					true => *byte as char,
					false => '.'
				};
				write!(f, "{}", c)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}
