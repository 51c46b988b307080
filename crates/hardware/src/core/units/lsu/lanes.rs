//! Byte and halfword lane logic.
//!
//! Lane selection uses the low 2 address bits for bytes and bit 1 for
//! halfwords.

use crate::core::fsm::signals::MemWidth;

/// Bit offset of the addressed lane inside its word.
const fn lane_shift(addr: u32, width: MemWidth) -> u32 {
    match width {
        MemWidth::Byte => (addr & 0x3) * 8,
        MemWidth::Half => (addr & 0x2) * 8,
        MemWidth::Word => 0,
    }
}

/// Value mask for an access width.
const fn lane_mask(width: MemWidth) -> u32 {
    match width {
        MemWidth::Byte => 0xFF,
        MemWidth::Half => 0xFFFF,
        MemWidth::Word => 0xFFFF_FFFF,
    }
}

/// Extracts and optionally sign-extends the addressed lane of `word`.
pub const fn extract(word: u32, addr: u32, width: MemWidth, signed: bool) -> u32 {
    let raw = (word >> lane_shift(addr, width)) & lane_mask(width);
    match (width, signed) {
        (MemWidth::Byte, true) => raw as u8 as i8 as i32 as u32,
        (MemWidth::Half, true) => raw as u16 as i16 as i32 as u32,
        _ => raw,
    }
}

/// Replaces the addressed lane of `old` with the low bits of `data`.
pub const fn merge(old: u32, addr: u32, data: u32, width: MemWidth) -> u32 {
    let shift = lane_shift(addr, width);
    let mask = lane_mask(width) << shift;
    (old & !mask) | ((data << shift) & mask)
}
