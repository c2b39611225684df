//! The raw representation of the USTAR header fields and some byte constants

use std::{ iter, mem };
use crate::UstarError;


/// The length of a tar block
pub const BLOCK_LEN: usize = 512;
/// The expected USTAR magic value
pub const MAGIC: &[u8; 6] = b"ustar\0";
/// The expected USTAR version value (not NUL-terminated)
pub const VERSION: &[u8; 2] = b"00";


/// Defines the USTAR header layout
pub mod header {
	use super::{ mem, BLOCK_LEN };

	/// A raw header block
	pub type Raw = [u8; BLOCK_LEN];
	/// Creates a new all-zero raw header
	pub const fn raw() -> Raw {
		[0; BLOCK_LEN]
	}

	/// The 1:1-byte representation of the USTAR header
	#[repr(C)]
	#[derive(Copy, Clone)]
	pub struct Header {
		pub name: [u8; 100],
		pub mode: [u8; 8],
		pub uid: [u8; 8],
		pub gid: [u8; 8],
		pub size: [u8; 12],
		pub mtime: [u8; 12],
		pub checksum: [u8; 8],
		pub typeflag: [u8; 1],
		pub linkname: [u8; 100],
		pub magic: [u8; 6],
		pub version: [u8; 2],
		pub _extra: [u8; 235],
		pub _pad: [u8; 12]
	}
	const _: () = assert!(mem::size_of::<Header>() == BLOCK_LEN);

	/// Creates a new all-zero header
	pub fn header() -> Header {
		Header::from(raw())
	}
	impl From<Raw> for Header {
		fn from(raw: Raw) -> Self {
			// All fields are byte arrays, so every bit pattern is a valid `Header`
			unsafe{ mem::transmute(raw) }
		}
	}
	impl From<Header> for Raw {
		fn from(header: Header) -> Self {
			unsafe{ mem::transmute(header) }
		}
	}
}


/// The type flags which indicate the record type
pub struct TypeFlag;
impl TypeFlag {
	/// The type flag for a regular file
	pub const REGULAR: u8 = b'0';
	/// The pre-POSIX type flag for a regular file
	pub const REGULAR_OLD: u8 = b'\0';
	/// The type flag for a hardlink
	pub const HARDLINK: u8 = b'1';
	/// The type flag for a symlink
	pub const SYMLINK: u8 = b'2';
	/// The type flag for a directory
	pub const DIRECTORY: u8 = b'5';
}


/// Helpers for checksum computation
pub(crate) struct Checksum;
impl Checksum {
	/// Computes the checksum over `tar` and writes it to the header as six octal digits, NUL and
	/// space
	pub fn write(tar: &mut header::Header) {
		let sum = Self::compute(&(*tar).into());
		let digits = format!("{:06o}", sum);
		let encoded = digits.bytes().chain(iter::once(0)).chain(iter::once(b' '));
		tar.checksum.iter_mut().zip(encoded).for_each(|(field, byte)| *field = byte);
	}

	/// Computes the checksum with the checksum field treated as eight spaces
	pub fn compute(raw: &header::Raw) -> u64 {
		raw[..148].iter().chain([b' '; 8].iter()).chain(raw[156..].iter())
			.fold(0, |sum, byte| sum + u64::from(*byte))
	}
}


/// Parses an octal field permissively
///
/// _Note: leading spaces are skipped, parsing stops at the first byte that is not an octal digit
/// (usually NUL or space); a field without any digits yields `None`_
pub fn parse_octal(field: &[u8]) -> Option<u64> {
	let digits = field.iter().skip_while(|b| **b == b' ')
		.take_while(|b| (b'0'..=b'7').contains(*b));
	digits.fold(None, |num, byte| {
		let num: u64 = num.unwrap_or(0);
		Some(num.saturating_mul(8).saturating_add(u64::from(byte - b'0')))
	})
}

/// Writes `num` into `field` as zero-padded octal digits followed by a NUL byte
pub fn write_octal(num: u64, field: &mut[u8]) -> Result<(), UstarError> {
	let digits = format!("{:o}", num);
	let available = field.len().saturating_sub(1);
	if digits.len() > available {
		Err(UstarError::ApiMisuse("Value does not fit into the octal field"))?
	}

	let padded = iter::repeat(b'0').take(available - digits.len()).chain(digits.bytes());
	let terminated = padded.chain(iter::once(0));
	field.iter_mut().zip(terminated).for_each(|(field, byte)| *field = byte);
	Ok(())
}


/// Decodes a NUL-padded (but not necessarily NUL-terminated) string field
pub fn read_string(field: &[u8]) -> Option<String> {
	let nul = field.iter().position(|b| *b == 0x00).unwrap_or(field.len());
	match nul {
		0 => None,
		nul => Some(String::from_utf8_lossy(&field[..nul]).into_owned())
	}
}

/// Writes `string` to `field` and NUL-pads the remaining bytes
pub fn write_string(string: &str, field: &mut[u8]) -> Result<(), UstarError> {
	if string.len() > field.len() {
		Err(UstarError::ApiMisuse("`field` is too small to hold the value"))?
	}
	if string.bytes().any(|b| b == 0) {
		Err(UstarError::ApiMisuse("Header strings must not contain NUL bytes"))?
	}

	let nul_padded = string.bytes().chain(iter::repeat(0));
	field.iter_mut().zip(nul_padded).for_each(|(field, byte)| *field = byte);
	Ok(())
}
