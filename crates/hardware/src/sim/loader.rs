//! Program Loading.
//!
//! This module places test programs into the simulated memory. It performs:
//! 1. **Format detection:** ELF by magic number, Verilog hex by extension, raw binary otherwise.
//! 2. **ELF loading:** Little-endian RV32 images; every segment's file bytes are
//!    copied to their load address and the `tohost` symbol is resolved.
//! 3. **Hex loading:** `$readmemh`-style byte tokens with `@address` directives.
//! 4. **Binary loading:** A flat image copied to a caller-supplied base address.
//!
//! Uninitialised (`.bss`) regions rely on RAM being zero at construction.

use std::fs;
use std::path::Path;

use object::read::elf::ElfFile32;
use object::{Architecture, LittleEndian, Object, ObjectSegment, ObjectSymbol};
use tracing::debug;

use crate::common::error::SimError;
use crate::soc::interconnect::Bus;

/// ELF magic number.
const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// Symbol test programs use for the completion sentinel.
const TOHOST_SYMBOL: &str = "tohost";

/// On-disk program format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramFormat {
    /// ELF32 executable.
    Elf,
    /// Verilog `$readmemh` byte hex.
    Hex,
    /// Flat binary.
    Binary,
}

impl ProgramFormat {
    /// Picks the format from the file contents and extension.
    pub fn detect(path: &Path, data: &[u8]) -> Self {
        if data.starts_with(&ELF_MAGIC) {
            return Self::Elf;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("hex" | "vh" | "mem") => Self::Hex,
            _ => Self::Binary,
        }
    }
}

/// What a load placed in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedImage {
    /// Entry point recorded in the image (ELF only).
    pub entry: Option<u32>,
    /// Address of the `tohost` symbol (ELF only).
    pub tohost: Option<u32>,
    /// Number of bytes written.
    pub bytes_loaded: usize,
}

/// Reads a whole file.
pub fn read_file(path: &Path) -> Result<Vec<u8>, SimError> {
    fs::read(path).map_err(|source| SimError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Loads a program file, detecting its format.
///
/// # Arguments
///
/// * `bus`  - Bus to write the image into.
/// * `path` - Program file.
/// * `base` - Load address for flat binaries.
pub fn load_program(bus: &mut Bus, path: &Path, base: u32) -> Result<LoadedImage, SimError> {
    let data = read_file(path)?;
    let format = ProgramFormat::detect(path, &data);
    debug!(path = %path.display(), ?format, "loading program");
    match format {
        ProgramFormat::Elf => load_elf(bus, &data),
        ProgramFormat::Hex => {
            let text = String::from_utf8_lossy(&data);
            load_hex(bus, &text)
        }
        ProgramFormat::Binary => load_binary(bus, &data, base),
    }
}

/// Loads a little-endian RV32 ELF image.
pub fn load_elf(bus: &mut Bus, data: &[u8]) -> Result<LoadedImage, SimError> {
    let elf = ElfFile32::<LittleEndian>::parse(data)?;
    if elf.architecture() != Architecture::Riscv32 {
        return Err(SimError::UnsupportedElf("not a RISC-V 32-bit image"));
    }

    let mut image = LoadedImage {
        entry: Some(elf.entry() as u32),
        ..LoadedImage::default()
    };

    for segment in elf.segments() {
        let bytes = segment.data()?;
        if bytes.is_empty() {
            continue;
        }
        let addr = segment.address() as u32;
        bus.load_binary_at(bytes, addr)?;
        image.bytes_loaded += bytes.len();
        debug!(
            addr = format_args!("{addr:#010x}"),
            len = bytes.len(),
            "loaded segment"
        );
    }

    image.tohost = elf
        .symbols()
        .find(|s| s.name().is_ok_and(|n| n == TOHOST_SYMBOL))
        .map(|s| s.address() as u32);
    Ok(image)
}

/// Parses Verilog byte hex into contiguous `(address, bytes)` runs.
///
/// Tokens are whitespace-separated; `//` starts a comment, `@hex` moves the
/// write address, two-digit tokens are bytes and eight-digit tokens are
/// little-endian words.
pub fn parse_hex(text: &str) -> Result<Vec<(u32, Vec<u8>)>, SimError> {
    let mut runs: Vec<(u32, Vec<u8>)> = Vec::new();
    let mut addr = 0u32;

    for (idx, line) in text.lines().enumerate() {
        let line = line.split("//").next().unwrap_or_default();
        for token in line.split_whitespace() {
            let bad = || SimError::Hex {
                line: idx + 1,
                token: token.to_string(),
            };

            if let Some(target) = token.strip_prefix('@') {
                addr = u32::from_str_radix(target, 16).map_err(|_| bad())?;
                continue;
            }

            let bytes: Vec<u8> = match token.len() {
                1 | 2 => vec![u8::from_str_radix(token, 16).map_err(|_| bad())?],
                8 => u32::from_str_radix(token, 16)
                    .map_err(|_| bad())?
                    .to_le_bytes()
                    .to_vec(),
                _ => return Err(bad()),
            };

            let len = bytes.len() as u32;
            match runs.last_mut() {
                Some((start, run)) if start.wrapping_add(run.len() as u32) == addr => {
                    run.extend_from_slice(&bytes);
                }
                _ => runs.push((addr, bytes)),
            }
            addr = addr.wrapping_add(len);
        }
    }
    Ok(runs)
}

/// Loads Verilog byte hex.
pub fn load_hex(bus: &mut Bus, text: &str) -> Result<LoadedImage, SimError> {
    let mut image = LoadedImage::default();
    for (addr, bytes) in parse_hex(text)? {
        bus.load_binary_at(&bytes, addr)?;
        image.bytes_loaded += bytes.len();
    }
    Ok(image)
}

/// Loads a flat binary at `base`.
pub fn load_binary(bus: &mut Bus, data: &[u8], base: u32) -> Result<LoadedImage, SimError> {
    bus.load_binary_at(data, base)?;
    Ok(LoadedImage {
        bytes_loaded: data.len(),
        ..LoadedImage::default()
    })
}
