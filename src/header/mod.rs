pub mod raw;

use crate::{
	UstarError,
	header::raw::{ Checksum, TypeFlag, MAGIC, VERSION }
};


/// The kind of an archive entry
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EntryKind {
	/// A regular file (type flag `'0'` or NUL)
	Regular,
	/// A directory (type flag `'5'`)
	Directory,
	/// A symbolic link (type flag `'2'`)
	Symlink,
	/// Any other type flag (hardlinks, devices, FIFOs, extension records...)
	Other(u8)
}
impl EntryKind {
	/// Classifies a raw type flag
	pub fn from_typeflag(typeflag: u8) -> Self {
		match typeflag {
			TypeFlag::REGULAR | TypeFlag::REGULAR_OLD => Self::Regular,
			TypeFlag::DIRECTORY => Self::Directory,
			TypeFlag::SYMLINK => Self::Symlink,
			other => Self::Other(other)
		}
	}
	/// The type flag written for this kind
	pub fn typeflag(self) -> u8 {
		match self {
			Self::Regular => TypeFlag::REGULAR,
			Self::Directory => TypeFlag::DIRECTORY,
			Self::Symlink => TypeFlag::SYMLINK,
			Self::Other(typeflag) => typeflag
		}
	}
}


/// The reason why a header block is not a conformant USTAR header
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatError {
	/// The magic field is not `"ustar\0"`
	MagicMismatch,
	/// The version field is not `"00"`
	VersionMismatch,
	/// The stored checksum does not match the computed one
	ChecksumMismatch {
		/// The checksum stored in the header (0 if unparsable)
		stored: u64,
		/// The checksum computed over the header bytes
		computed: u64
	}
}
impl std::fmt::Display for FormatError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::MagicMismatch => write!(f, "invalid magic value"),
			Self::VersionMismatch => write!(f, "invalid version value"),
			Self::ChecksumMismatch { stored, computed } =>
				write!(f, "checksum mismatch (stored {:o}, computed {:o})", stored, computed)
		}
	}
}


/// A decoded USTAR header
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Header {
	/// The record's path and name
	pub path: String,
	/// The record's access mode bits (e.g. 0o644)
	pub mode: Option<u64>,
	/// The record's UID
	pub uid: Option<u64>,
	/// The record's GID
	pub gid: Option<u64>,
	/// The record's size (0 if the field is malformed)
	pub size: u64,
	/// The record's modification time
	pub mtime: Option<u64>,
	/// The record's raw type flag
	pub typeflag: u8,
	/// The record's link target
	pub linkname: Option<String>
}
impl Header {
	/// Creates a header with the minimal set of fields for a new record of `kind`
	pub fn new(path: impl Into<String>, size: u64, kind: EntryKind) -> Self {
		let mode = match kind {
			EntryKind::Directory => 0o755,
			EntryKind::Symlink => 0o777,
			_ => 0o644
		};
		Self { path: path.into(), mode: Some(mode), size, typeflag: kind.typeflag(), ..Self::default() }
	}
	/// Creates a symlink header pointing to `target`
	pub fn symlink(path: impl Into<String>, target: impl Into<String>) -> Self {
		Self { linkname: Some(target.into()), ..Self::new(path, 0, EntryKind::Symlink) }
	}

	/// The kind of this record
	pub fn kind(&self) -> EntryKind {
		EntryKind::from_typeflag(self.typeflag)
	}

	/// Checks whether `data` is an end-of-archive marker (the first name byte is NUL)
	pub fn is_terminal(data: &raw::header::Raw) -> bool {
		data[0] == 0
	}

	/// Decodes a raw header block
	///
	/// _Note: decoding never fails; malformed numeric fields decode as zero (or `None`) since the
	/// block is verified independently via [`Header::verify`]_
	pub fn parse(data: &raw::header::Raw) -> Self {
		let tar = raw::header::Header::from(*data);
		Self {
			path: raw::read_string(&tar.name).unwrap_or_default(),
			mode: raw::parse_octal(&tar.mode),
			uid: raw::parse_octal(&tar.uid),
			gid: raw::parse_octal(&tar.gid),
			size: raw::parse_octal(&tar.size).unwrap_or(0),
			mtime: raw::parse_octal(&tar.mtime),
			typeflag: tar.typeflag[0],
			linkname: raw::read_string(&tar.linkname)
		}
	}

	/// Verifies the magic value, the version and the checksum of `data` (in that order)
	pub fn verify(data: &raw::header::Raw) -> Result<(), FormatError> {
		let tar = raw::header::Header::from(*data);
		if &tar.magic != MAGIC {
			Err(FormatError::MagicMismatch)?
		}
		if &tar.version != VERSION {
			Err(FormatError::VersionMismatch)?
		}

		let stored = raw::parse_octal(&tar.checksum).unwrap_or(0);
		let computed = Checksum::compute(data);
		match stored == computed {
			true => Ok(()),
			false => Err(FormatError::ChecksumMismatch { stored, computed })
		}
	}

	/// Serializes the header into a raw byte block with magic, version and a fresh checksum
	///
	/// _Note: this function can fail because the struct may contain values that cannot be
	/// serialized, e.g. a name longer than 100 bytes or a size of 8 GiB or more_
	pub fn serialize(&self) -> Result<raw::header::Raw, UstarError> {
		if self.path.is_empty() {
			Err(UstarError::ApiMisuse("The record path must not be empty"))?
		}

		// Create and populate the header
		let mut tar = raw::header::header();
		raw::write_string(&self.path, &mut tar.name)?;
		for (value, field) in [(self.mode, &mut tar.mode[..]), (self.uid, &mut tar.uid[..]),
			(self.gid, &mut tar.gid[..]), (self.mtime, &mut tar.mtime[..])]
		{
			if let Some(value) = value {
				raw::write_octal(value, field)?;
			}
		}
		raw::write_octal(self.size, &mut tar.size)?;

		tar.typeflag[0] = self.typeflag;
		if let Some(linkname) = self.linkname.as_ref() {
			raw::write_string(linkname, &mut tar.linkname)?;
		}
		tar.magic = *MAGIC;
		tar.version = *VERSION;

		// Write the checksum and return the header
		Checksum::write(&mut tar);
		Ok(tar.into())
	}
}


/// Encodes a minimal header for a new record
pub fn encode(path: &str, size: u64, kind: EntryKind) -> Result<raw::header::Raw, UstarError> {
	Header::new(path, size, kind).serialize()
}
