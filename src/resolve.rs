//! Symlink resolution and directory listing

use crate::{
	Archive, UstarError,
	header::EntryKind,
	scanner::{ self, Entries }
};
use std::{
	collections::HashSet,
	convert::Infallible,
	io::{ Read, Seek },
	ops::ControlFlow
};


/// How a record name relates to a listed prefix
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Membership {
	/// The record is the prefix itself
	Itself,
	/// The record is a direct child of the prefix
	Child,
	/// The record is nested deeper or lies outside of the prefix
	Unrelated
}
impl Membership {
	/// Classifies `name` relative to `prefix` (an empty prefix is the archive root)
	pub fn of(name: &str, prefix: &str) -> Self {
		let relative = match prefix {
			"" => Some(name),
			prefix => name.strip_prefix(prefix).and_then(|rest| match rest {
				rest if prefix.ends_with('/') || rest.is_empty() => Some(rest),
				rest => rest.strip_prefix('/')
			})
		};

		match relative {
			None => Self::Unrelated,
			Some("") => Self::Itself,
			Some(rest) => match rest.find('/') {
				None => Self::Child,
				Some(slash) if slash + 1 == rest.len() => Self::Child,
				Some(_) => Self::Unrelated
			}
		}
	}
}


/// Whether a listed path exists
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ListStatus {
	/// Neither a record nor any child matches the path
	Missing,
	/// The path is the root, a record or the parent of at least one record
	Found
}
impl ListStatus {
	/// The numeric status of the classic C-style interface (`0` missing, `1` found)
	///
	/// _Note: a failed listing has no `ListStatus`; its `Result` reports `-1` via `StatusCode`_
	pub fn code(self) -> i32 {
		match self {
			Self::Missing => 0,
			Self::Found => 1
		}
	}
}

/// The result of a capacity-bounded listing
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Listing {
	/// Whether the listed path exists
	pub status: ListStatus,
	/// The direct children in archive order, at most `capacity` many
	pub children: Vec<String>,
	/// The amount of direct children found (may exceed `children.len()`)
	pub found: usize
}
impl Listing {
	/// Whether children were dropped because of the capacity
	pub fn is_truncated(&self) -> bool {
		self.found > self.children.len()
	}
}


/// A lazily scanned sequence of the direct children of a resolved path
///
/// Restart by calling [`Archive::children`] again.
pub struct Children<'a, T> {
	entries: Entries<'a, T>,
	prefix: String
}
impl<T> Children<'_, T> {
	/// The resolved path whose children are listed
	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}
impl<T: Read + Seek> Iterator for Children<'_, T> {
	type Item = Result<String, UstarError>;

	fn next(&mut self) -> Option<Self::Item> {
		for entry in self.entries.by_ref() {
			match entry {
				Err(e) => return Some(Err(e)),
				Ok(entry) if Membership::of(&entry.header.path, &self.prefix) == Membership::Child =>
					return Some(Ok(entry.header.path)),
				Ok(_) => continue
			}
		}
		None
	}
}


impl<T: Read + Seek> Archive<T> {
	/// Follows symlink records until `path` names no symlink
	///
	/// Fails with `SymlinkCycle` if a path is visited twice or if the configured hop limit is
	/// exceeded.
	pub fn resolve(&mut self, path: &str) -> Result<String, UstarError> {
		let mut current = path.to_string();
		let mut visited = HashSet::new();
		let mut hops = 0;
		while let Some(target) = self.link_target(&current)? {
			log::debug!("Resolved symlink {:?} -> {:?}", current, target);
			hops += 1;

			let over_limit = self.options.max_link_hops.map_or(false, |max| hops > max);
			if !visited.insert(current.clone()) || over_limit {
				Err(UstarError::SymlinkCycle { path: path.to_string(), hops })?
			}
			current = target;
		}
		Ok(current)
	}

	/// Lists the direct children of `path` (or of the root), storing at most `capacity` names
	pub fn list(&mut self, path: Option<&str>, capacity: usize) -> Result<Listing, UstarError> {
		let prefix = self.resolve(path.unwrap_or_default())?;

		let mut exists = prefix.is_empty();
		let (mut children, mut found) = (Vec::new(), 0);
		let outcome = scanner::for_each_entry(&mut self.cursor, |entry| {
			match Membership::of(&entry.header.path, &prefix) {
				Membership::Itself => exists = true,
				Membership::Child => {
					if children.len() < capacity {
						children.push(entry.header.path.clone());
					}
					found += 1;
				},
				Membership::Unrelated => ()
			}
			ControlFlow::<Infallible>::Continue(())
		})?;
		match outcome {
			ControlFlow::Continue(end) => log::trace!("Listed {:?} up to offset {}", prefix, end),
			ControlFlow::Break(never) => match never {}
		}

		let status = match exists || found > 0 {
			true => ListStatus::Found,
			false => ListStatus::Missing
		};
		Ok(Listing { status, children, found })
	}

	/// Lazily yields the direct children of `path` (or of the root) after resolving symlinks
	pub fn children(&mut self, path: Option<&str>) -> Result<Children<'_, T>, UstarError> {
		let prefix = self.resolve(path.unwrap_or_default())?;
		Ok(Children { entries: self.entries()?, prefix })
	}

	/// The link target of the symlink record named exactly `path`
	fn link_target(&mut self, path: &str) -> Result<Option<String>, UstarError> {
		let outcome = scanner::for_each_entry(&mut self.cursor, |entry| {
			match entry.header.kind() == EntryKind::Symlink && entry.header.path == path {
				true => ControlFlow::Break(entry.header.linkname.clone().unwrap_or_default()),
				false => ControlFlow::Continue(())
			}
		})?;
		match outcome {
			ControlFlow::Break(target) => Ok(Some(target)),
			ControlFlow::Continue(_) => Ok(None)
		}
	}
}
