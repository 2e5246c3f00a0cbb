//! Code view over real x86 machine code.

use std::rc::Rc;

use hexitch::view_mode::{CodeRow, Row, RowText};
use hexitch::{
    AddressSpace, DecodeItem, Decoder, Direction, IcedDecoder, ModeKind, Session, ViewMode,
};

// push rbp; mov rbp,rsp; sub rsp,0x10; nop; leave; ret
const PROLOGUE: [u8; 11] = [0x55, 0x48, 0x89, 0xe5, 0x48, 0x83, 0xec, 0x10, 0x90, 0xc9, 0xc3];

fn code_rows(bytes: &[u8], base: u64) -> Vec<CodeRow> {
    let decoder: Rc<dyn Decoder> = Rc::new(IcedDecoder::new(64).unwrap());
    let mode = ViewMode::code(decoder);
    let space = AddressSpace::from_bytes(bytes.to_vec());
    let page = mode.decode_rows(&space, base, 16).unwrap();
    page.rows()
        .iter()
        .map(|row| match row {
            Row::Code(row) => row.clone(),
            Row::Hex(_) => panic!("hex row in code mode"),
        })
        .collect()
}

#[test]
fn prologue_rows() {
    let rows = code_rows(&[0x55, 0x48, 0x89, 0xe5, 0x90, 0xc9, 0xc3], 0);
    let summary: Vec<(u64, usize, RowText)> = rows
        .iter()
        .map(|row| (row.address, row.length, row.text.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 1, RowText::Decoded("push rbp".to_string())),
            (1, 3, RowText::Decoded("mov rbp,rsp".to_string())),
            (4, 1, RowText::Decoded("nop".to_string())),
            (5, 1, RowText::Decoded("leave".to_string())),
            (6, 1, RowText::Decoded("ret".to_string())),
        ]
    );
    assert_eq!(rows[1].bytes, vec![0x48, 0x89, 0xe5]);
}

#[test]
fn invalid_opcode_resynchronizes() {
    // push es does not exist in 64-bit mode
    let rows = code_rows(&[0x55, 0x06, 0xc3], 0);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].address, 1);
    assert_eq!(rows[1].length, 1);
    assert_eq!(rows[1].text, RowText::Undecodable);
    assert_eq!(rows[2].text, RowText::Decoded("ret".to_string()));
}

#[test]
fn decoder_reports_addresses_from_its_base() {
    let decoder = IcedDecoder::new(64).unwrap();
    let items: Vec<DecodeItem> = decoder.decode(&[0x55, 0x06, 0xc3], 0x1000).collect();
    let addresses: Vec<u64> = items.iter().map(DecodeItem::address).collect();
    assert_eq!(addresses, vec![0x1000, 0x1001, 0x1002]);
    assert_eq!(items[1], DecodeItem::Undecodable { address: 0x1001 });
}

#[test]
fn truncated_instruction_at_eof() {
    // mov rbp,rsp missing its last byte
    let rows = code_rows(&PROLOGUE[..3], 0);
    let lengths: Vec<usize> = rows.iter().map(|row| row.length).collect();
    assert_eq!(lengths, vec![1, 1, 1]);
    assert!(rows[1..].iter().all(|row| row.text == RowText::Undecodable));
}

#[test]
fn navigating_real_code() {
    let decoder: Rc<dyn Decoder> = Rc::new(IcedDecoder::new(64).unwrap());
    let mut bytes = Vec::new();
    for _ in 0..64 {
        bytes.extend_from_slice(&PROLOGUE);
    }
    let total = bytes.len() as u64;
    let mut session = Session::new(
        AddressSpace::from_bytes(bytes),
        decoder,
        ModeKind::Code,
        0,
        8,
    )
    .unwrap();

    session.navigate(Direction::Down).unwrap();
    assert_eq!(session.viewport().current_address(), 1);
    session.navigate(Direction::Down).unwrap();
    assert_eq!(session.viewport().current_address(), 4);

    while session.viewport().current_address() < total {
        let before = session.viewport().current_address();
        session.navigate(Direction::Down).unwrap();
        assert!(session.viewport().current_address() > before);
    }
    assert_eq!(session.viewport().current_address(), total);
}
