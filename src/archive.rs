use crate::{ cursor::BlockCursor, scanner::Entries, UstarError };
use std::io::{ Read, Seek };


/// Tunables for an [`Archive`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ArchiveOptions {
	/// The maximum amount of symlink substitutions during path resolution; `None` relies on cycle
	/// detection alone
	pub max_link_hops: Option<usize>,
	/// The permission bits written for appended files
	pub file_mode: u32
}
impl Default for ArchiveOptions {
	fn default() -> Self {
		Self { max_link_hops: None, file_mode: 0o644 }
	}
}


/// A handle to an opened USTAR archive
///
/// The handle owns the only cursor into the resource; every operation takes `&mut self` and
/// rescans from the first block, leaving the cursor at an arbitrary (but valid) position.
#[derive(Debug)]
pub struct Archive<T> {
	pub(crate) cursor: BlockCursor<T>,
	pub(crate) options: ArchiveOptions
}
impl<T> Archive<T> {
	/// Wraps an already opened archive resource (e.g. a `File` or `&mut File`)
	pub fn new(inner: T) -> Self {
		Self::with_options(inner, ArchiveOptions::default())
	}
	/// Wraps `inner` using `options`
	pub fn with_options(inner: T, options: ArchiveOptions) -> Self {
		Self { cursor: BlockCursor::new(inner), options }
	}

	/// Caps the amount of symlink substitutions per resolution
	pub fn max_link_hops(mut self, hops: usize) -> Self {
		self.options.max_link_hops = Some(hops);
		self
	}
	/// Sets the permission bits for appended files
	pub fn file_mode(mut self, mode: u32) -> Self {
		self.options.file_mode = mode;
		self
	}

	/// The active options
	pub fn options(&self) -> &ArchiveOptions {
		&self.options
	}
	/// Returns the wrapped resource
	pub fn into_inner(self) -> T {
		self.cursor.into_inner()
	}
}
impl<T: Read + Seek> Archive<T> {
	/// Iterates over all records from the start of the archive
	pub fn entries(&mut self) -> Result<Entries<'_, T>, UstarError> {
		Entries::new(&mut self.cursor)
	}
}
