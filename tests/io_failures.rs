mod archive_builder;

use archive_builder::{ reference, Faulty };
use ustar_probe::{ Archive, Header, StatusCode, UstarError, VALIDATE_FAILED, raw::BLOCK_LEN };


#[test]
fn validate_propagates_read_failures() {
	// Fails on the third header read
	let mut archive = Archive::new(Faulty::new(reference().finish()).fail_reads_after(2));
	let result = archive.validate();
	assert!(matches!(result, Err(UstarError::Io(_))), "Unexpected result: {:?}", result);
	assert_eq!(result.status_code(), VALIDATE_FAILED);
}

#[test]
fn queries_propagate_seek_failures() {
	let mut archive = Archive::new(Faulty::new(reference().finish()).fail_seeks());
	assert!(matches!(archive.validate(), Err(UstarError::Io(_))));
	assert!(matches!(archive.exists("a"), Err(UstarError::Io(_))));
	assert!(matches!(archive.is_directory("c/"), Err(UstarError::Io(_))));
}

#[test]
fn failed_listings_report_minus_one() {
	let mut archive = Archive::new(Faulty::new(reference().finish()).fail_reads_after(0));
	let result = archive.list(Some("c/"), 10);
	assert!(matches!(result, Err(UstarError::Io(_))), "Unexpected result: {:?}", result);
	assert_eq!(result.status_code(), -1);

	let mut archive = reference().symlink("x", "y").symlink("y", "x").open();
	let result = archive.list(Some("x"), 10);
	assert!(matches!(result, Err(UstarError::SymlinkCycle { .. })));
	assert_eq!(result.status_code(), -1);

	assert_eq!(reference().open().list(Some("c/"), 10).status_code(), 1);
	assert_eq!(reference().open().list(Some("nope"), 10).status_code(), 0);
}

#[test]
fn children_stop_after_a_read_failure() {
	// Resolving the root takes six reads (five headers and the terminator), then `a` and `b`
	let mut archive = Archive::new(Faulty::new(reference().finish()).fail_reads_after(8));
	let items: Vec<_> = archive.children(None).unwrap().collect();
	assert_eq!(items.len(), 3);
	assert_eq!(items[0].as_ref().unwrap(), "a");
	assert_eq!(items[1].as_ref().unwrap(), "b");
	assert!(matches!(items[2], Err(UstarError::Io(_))));
}

#[test]
fn append_fails_before_writing_if_the_scan_fails() {
	let original = reference().finish();
	let mut archive = Archive::new(Faulty::new(original.clone()).fail_reads_after(1));
	let result = archive.append("newfile", b"hi");
	assert!(matches!(result, Err(UstarError::Io(_))));
	assert_eq!(result.status_code(), -2);
	assert_eq!(archive.into_inner().into_inner(), original);
}

#[test]
fn append_keeps_partial_writes() {
	let original = reference().finish();
	let end = original.len() - 2 * BLOCK_LEN;

	// The header and the first 100 payload bytes make it to the archive
	let resource = Faulty::new(original.clone()).fail_writes_after(BLOCK_LEN + 100);
	let mut archive = Archive::new(resource);
	let result = archive.append("big", &[b'p'; 1000]);
	assert!(matches!(result, Err(UstarError::Io(_))), "Unexpected result: {:?}", result);
	assert_eq!(result.status_code(), -2);

	let data = archive.into_inner().into_inner();
	assert_eq!(&data[..end], &original[..end]);
	let mut header = [0; BLOCK_LEN];
	header.copy_from_slice(&data[end .. end + BLOCK_LEN]);
	assert_eq!(Header::parse(&header).path, "big");
	assert!(data[end + BLOCK_LEN .. end + BLOCK_LEN + 100].iter().all(|b| *b == b'p'));
	assert!(data[end + BLOCK_LEN + 100 ..].iter().all(|b| *b == 0));
}
