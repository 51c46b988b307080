use pretty_assertions::assert_eq;
use rstest::rstest;
use rvdbg_core::config::Config;
use rvdbg_core::soc::System;
use rvdbg_core::soc::devices::debug_rom::PARK_LOOP;
use rvdbg_core::soc::devices::{DebugRom, Device, Htif, HtifStatus};

#[test]
fn debug_rom_parks_out_of_reset() {
    let mut rom = DebugRom::new(0x600);
    assert_eq!(rom.address_range().0, 0x600);
    assert_eq!(rom.read_u32(0), PARK_LOOP);
    assert_eq!(rom.read_u32(4), PARK_LOOP);
    assert_eq!(rom.read_u32(8), 0);
}

#[test]
fn debug_rom_program_buffer_is_writable() {
    let mut rom = DebugRom::new(0x600);
    rom.load_program(&[0x7B20_0073]);
    assert_eq!(rom.read_u32(0), 0x7B20_0073);
    assert_eq!(rom.read_u32(4), PARK_LOOP);

    let size = rom.address_range().1;
    rom.write_u8(size, 0xFF);
    assert_eq!(rom.read_u8(size), 0);
}

#[rstest]
#[case(1, HtifStatus::Pass, 0)]
#[case(7, HtifStatus::Fail(3), 3)]
#[case(0x42, HtifStatus::Other(0x42), 0x42)]
#[case(0, HtifStatus::Other(0), 1)]
#[case((128 << 1) | 1, HtifStatus::Fail(128), 1)]
#[case(0x100, HtifStatus::Other(0x100), 1)]
fn htif_status_decoding(#[case] value: u32, #[case] status: HtifStatus, #[case] code: i32) {
    assert_eq!(HtifStatus::from_value(value), status);
    assert_eq!(status.exit_code(), code);
}

#[test]
fn htif_accepts_writes_and_reads_zero() {
    let mut htif = Htif::new(0x8000_1000);
    assert_eq!(htif.address_range(), (0x8000_1000, 16));
    htif.write_u32(4, 9);
    htif.write_u32(0, 1);
    assert_eq!(htif.read_u32(0), 0);
    assert_eq!(HtifStatus::Fail(2).to_string(), "FAIL (test 2)");
}

#[test]
fn default_system_maps_rom_ram_and_htif() {
    let system = System::new(&Config::default());
    assert_eq!(system.bus.device_names(), vec!["DEBUG_ROM", "RAM", "HTIF"]);
}

#[test]
fn tohost_inside_ram_needs_no_htif() {
    let mut config = Config::default();
    config.core.tohost = config.core.ram_base + 0x1000;
    let system = System::new(&config);
    assert_eq!(system.bus.device_names(), vec!["DEBUG_ROM", "RAM"]);
}
