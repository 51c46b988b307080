//! Load/Store Lane Tests
//!
//! The data port is word-wide: loads pick a lane out of the returned word and
//! sub-word stores merge into the word read back from memory.

use proptest::prelude::*;
use rstest::rstest;
use rvdbg_core::core::fsm::signals::MemWidth;
use rvdbg_core::core::units::lsu::Lsu;

const WORD: u32 = 0x8899_AA44;

#[rstest]
#[case(0, 0x44)]
#[case(1, 0xAA)]
#[case(2, 0x99)]
#[case(3, 0x88)]
fn byte_loads_zero_extend(#[case] offset: u32, #[case] expected: u32) {
    assert_eq!(Lsu::load(WORD, 0x100 + offset, MemWidth::Byte, false), expected);
}

#[test]
fn byte_loads_sign_extend() {
    assert_eq!(Lsu::load(WORD, 0x101, MemWidth::Byte, true), 0xFFFF_FFAA);
    assert_eq!(Lsu::load(WORD, 0x100, MemWidth::Byte, true), 0x44);
}

#[test]
fn halfword_lanes() {
    assert_eq!(Lsu::load(WORD, 0x100, MemWidth::Half, false), 0xAA44);
    assert_eq!(Lsu::load(WORD, 0x102, MemWidth::Half, true), 0xFFFF_8899);
}

#[test]
fn word_store_replaces_everything() {
    assert_eq!(Lsu::store(WORD, 0x100, 0x1234_5678, MemWidth::Word), 0x1234_5678);
}

#[test]
fn halfword_store_merges_upper_lane() {
    assert_eq!(Lsu::store(WORD, 0x102, 0xBEEF, MemWidth::Half), 0xBEEF_AA44);
}

proptest! {
    #[test]
    fn byte_store_touches_one_lane(old: u32, data: u32, offset in 0u32..4) {
        let merged = Lsu::store(old, 0x200 + offset, data, MemWidth::Byte);
        let mask = 0xFFu32 << (offset * 8);
        prop_assert_eq!(merged & !mask, old & !mask);
        prop_assert_eq!(Lsu::load(merged, 0x200 + offset, MemWidth::Byte, false), data & 0xFF);
    }
}
