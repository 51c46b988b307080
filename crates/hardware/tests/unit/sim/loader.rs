use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use rvdbg_core::common::error::SimError;
use rvdbg_core::config::Config;
use rvdbg_core::sim::loader::{self, ProgramFormat};
use rvdbg_core::soc::System;

use crate::common::builder::instruction::InstructionBuilder as I;

const EM_RISCV: u16 = 243;
const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;

/// Builds a minimal little-endian ELF32 executable with one `PT_LOAD` segment.
pub fn elf32(machine: u16, entry: u32, vaddr: u32, words: &[u32]) -> Vec<u8> {
    let payload: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    let offset = EHDR_SIZE + PHDR_SIZE;
    let mut elf = Vec::new();

    elf.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
    elf.extend_from_slice(&[0; 8]);
    elf.extend_from_slice(&2_u16.to_le_bytes()); // ET_EXEC
    elf.extend_from_slice(&machine.to_le_bytes());
    elf.extend_from_slice(&1_u32.to_le_bytes());
    elf.extend_from_slice(&entry.to_le_bytes());
    elf.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // e_phoff
    elf.extend_from_slice(&0_u32.to_le_bytes()); // e_shoff
    elf.extend_from_slice(&0_u32.to_le_bytes()); // e_flags
    elf.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
    elf.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
    elf.extend_from_slice(&1_u16.to_le_bytes());
    elf.extend_from_slice(&40_u16.to_le_bytes());
    elf.extend_from_slice(&0_u16.to_le_bytes());
    elf.extend_from_slice(&0_u16.to_le_bytes());

    elf.extend_from_slice(&1_u32.to_le_bytes()); // PT_LOAD
    elf.extend_from_slice(&offset.to_le_bytes());
    elf.extend_from_slice(&vaddr.to_le_bytes());
    elf.extend_from_slice(&vaddr.to_le_bytes());
    elf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    elf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    elf.extend_from_slice(&5_u32.to_le_bytes()); // R + X
    elf.extend_from_slice(&4_u32.to_le_bytes());

    elf.extend_from_slice(&payload);
    elf
}

/// Writes `data` to a temporary file with the given suffix.
pub fn temp_program(suffix: &str, data: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}

fn system() -> System {
    System::new(&Config::default())
}

#[test]
fn format_detection() {
    assert_eq!(
        ProgramFormat::detect(Path::new("a.bin"), b"\x7fELF\x01"),
        ProgramFormat::Elf
    );
    assert_eq!(ProgramFormat::detect(Path::new("a.hex"), b"@0"), ProgramFormat::Hex);
    assert_eq!(ProgramFormat::detect(Path::new("a.mem"), b"00"), ProgramFormat::Hex);
    assert_eq!(ProgramFormat::detect(Path::new("a.bin"), b"00"), ProgramFormat::Binary);
}

#[test]
fn elf_segments_land_at_their_addresses() {
    let nop = I::new().addi(0, 0, 0).build();
    let image = elf32(EM_RISCV, 0x1_0100, 0x1_0100, &[nop, 0x0000_006F]);
    let mut sys = system();

    let loaded = loader::load_elf(&mut sys.bus, &image).unwrap();
    assert_eq!(loaded.entry, Some(0x1_0100));
    assert_eq!(loaded.tohost, None);
    assert_eq!(loaded.bytes_loaded, 8);
    assert_eq!(sys.bus.read_u32(0x1_0100), nop);
    assert_eq!(sys.bus.read_u32(0x1_0104), 0x6F);
}

#[test]
fn elf_for_another_machine_is_rejected() {
    let image = elf32(62, 0x1_0000, 0x1_0000, &[0]);
    assert!(matches!(
        loader::load_elf(&mut system().bus, &image),
        Err(SimError::UnsupportedElf(_))
    ));
}

#[test]
fn truncated_elf_is_a_parse_error() {
    let image = elf32(EM_RISCV, 0, 0x1_0000, &[0]);
    assert!(matches!(
        loader::load_elf(&mut system().bus, &image[..40]),
        Err(SimError::Elf(_))
    ));
}

#[test]
fn hex_file_is_loaded_by_extension() {
    let file = temp_program(".hex", b"@10000\n13 05 10 00 // li a0, 1\n0000006F\n");
    let mut sys = system();

    let loaded = loader::load_program(&mut sys.bus, file.path(), 0).unwrap();
    assert_eq!(loaded.bytes_loaded, 8);
    assert_eq!(loaded.entry, None);
    assert_eq!(sys.bus.read_u32(0x1_0000), 0x0010_0513);
    assert_eq!(sys.bus.read_u32(0x1_0004), 0x6F);
}

#[test]
fn binary_file_is_loaded_at_base() {
    let file = temp_program(".bin", &[0x13, 0, 0, 0, 0x6F, 0, 0, 0]);
    let mut sys = system();

    let _ = loader::load_program(&mut sys.bus, file.path(), 0x1_0010).unwrap();
    assert_eq!(sys.bus.read_u32(0x1_0010), 0x13);
    assert_eq!(sys.bus.read_u32(0x1_0014), 0x6F);
}

#[test]
fn image_outside_memory_is_rejected() {
    let file = temp_program(".bin", &[0; 16]);
    let result = loader::load_program(&mut system().bus, file.path(), 0x4000_0000);
    assert!(matches!(
        result,
        Err(SimError::Unmapped {
            addr: 0x4000_0000,
            len: 16
        })
    ));
}

#[test]
fn missing_file_reports_path() {
    let err = loader::read_file(Path::new("/nonexistent/prog.bin")).unwrap_err();
    match err {
        SimError::Io { path, .. } => assert_eq!(path, "/nonexistent/prog.bin"),
        other => panic!("unexpected error: {other}"),
    }
}
