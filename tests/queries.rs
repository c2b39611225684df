mod archive_builder;

use archive_builder::{ reference, Builder };


#[test]
fn exists_matches_exact_names() {
	let mut archive = reference().open();
	for name in ["a", "b", "c/", "c/d", "e/"] {
		assert!(archive.exists(name).unwrap(), "{} should exist", name);
		assert!(!archive.exists(&format!("{}/garbage", name)).unwrap());
	}

	// No trailing separator normalization
	assert!(!archive.exists("c").unwrap());
	assert!(!archive.exists("").unwrap());
}

#[test]
fn directories_ignore_one_trailing_separator() {
	let mut archive = reference().open();
	assert!(archive.is_directory("c/").unwrap());
	assert!(archive.is_directory("c").unwrap());
	assert!(archive.is_directory("e").unwrap());
	assert!(!archive.is_directory("a").unwrap());
	assert!(!archive.is_directory("c/d").unwrap());
	assert!(!archive.is_directory("c//").unwrap());
}

#[test]
fn files_need_exact_names() {
	let mut archive = reference().open();
	assert!(archive.is_file("a").unwrap());
	assert!(archive.is_file("c/d").unwrap());
	assert!(!archive.is_file("a/").unwrap());
	assert!(!archive.is_file("c/").unwrap());
	assert!(!archive.is_file("missing").unwrap());
}

#[test]
fn old_style_regular_flag_counts_as_file() {
	let mut header = ustar_probe::Header::new("old", 1, ustar_probe::EntryKind::Regular);
	header.typeflag = b'\0';
	let mut archive = Builder::new().record(header, b"x").open();
	assert!(archive.is_file("old").unwrap());
}

#[test]
fn hardlinks_are_neither_files_nor_directories() {
	let mut header = ustar_probe::Header::new("hard", 0, ustar_probe::EntryKind::Other(b'1'));
	header.linkname = Some("a".into());
	let mut archive = reference().record(header, b"").open();
	assert!(archive.exists("hard").unwrap());
	assert!(!archive.is_file("hard").unwrap());
	assert!(!archive.is_directory("hard").unwrap());
	assert!(!archive.is_symlink("hard").unwrap());
}

#[test]
fn symlinks_need_exact_names() {
	let mut archive = reference().symlink("link", "c/").open();
	assert!(archive.is_symlink("link").unwrap());
	assert!(!archive.is_symlink("link/").unwrap());
	assert!(!archive.is_symlink("a").unwrap());
	assert!(!archive.is_file("link").unwrap());
}

#[test]
fn queries_leave_the_archive_untouched() {
	let data = reference().finish();
	let mut archive = ustar_probe::Archive::new(std::io::Cursor::new(data.clone()));
	archive.exists("a").unwrap();
	archive.is_directory("c").unwrap();
	archive.validate().unwrap();
	assert_eq!(archive.into_inner().into_inner(), data);
}
