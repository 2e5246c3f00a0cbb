//! File-backed address space.

mod common;

use std::rc::Rc;

use common::{create_temp_file, pseudo_random_bytes, NibbleDecoder};
use hexitch::{AddressSpace, Direction, HexitchError, ModeKind, Session};

#[test]
fn file_reads_match_contents() {
    let bytes = pseudo_random_bytes(5000, 17);
    let file = create_temp_file(&bytes);
    let space = AddressSpace::open(file.path()).unwrap();
    assert_eq!(space.size(), 5000);
    assert_eq!(space.path(), Some(file.path()));

    // out of order on purpose: no read may depend on the previous position
    for &(address, length) in &[(4096usize, 64usize), (0, 16), (4990, 32), (123, 1), (5000, 8)] {
        let window = space.read(address as u64, length).unwrap();
        let end = std::cmp::min(address + length, bytes.len());
        assert_eq!(window.bytes(), &bytes[address.min(end)..end]);
        assert_eq!(window.requested(), length);
    }
}

#[test]
fn bytes_past_end_are_absent() {
    let file = create_temp_file(&[0, 0, 0, 0]);
    let space = AddressSpace::open(file.path()).unwrap();
    let window = space.read(2, 4).unwrap();
    assert_eq!(window.get(1), Some(0));
    assert_eq!(window.get(2), None);
    assert!(window.is_short());
}

#[test]
fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.bin");
    match AddressSpace::open(&path) {
        Err(HexitchError::FileUnavailable { path: reported, .. }) => assert_eq!(reported, path),
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("opened a missing file"),
    }
}

#[test]
fn empty_file_session() {
    let file = create_temp_file(&[]);
    let space = AddressSpace::open(file.path()).unwrap();
    let mut session = Session::new(space, Rc::new(NibbleDecoder), ModeKind::Hex, 0x40, 10).unwrap();
    assert_eq!(session.viewport().current_address(), 0);
    assert_eq!(session.viewport().percentage(0), "0.0%");

    session.navigate(Direction::Down).unwrap();
    session.toggle_mode().unwrap();
    session.navigate(Direction::Right).unwrap();
    assert_eq!(session.viewport().current_address(), 0);
}

#[test]
fn paging_through_a_file() {
    let bytes = pseudo_random_bytes(64 * 1024, 2);
    let file = create_temp_file(&bytes);
    let space = AddressSpace::open(file.path()).unwrap();
    let mut session = Session::new(space, Rc::new(NibbleDecoder), ModeKind::Hex, 0, 20).unwrap();

    session.jump_to(0x8000).unwrap();
    assert_eq!(session.viewport().page_address(), 0x8000);
    for _ in 0..25 {
        session.navigate(Direction::Down).unwrap();
    }
    assert_eq!(session.viewport().current_address(), 0x8000 + 25 * 16);
    assert_eq!(session.viewport().page_address(), 0x8000 + 6 * 16);
}
