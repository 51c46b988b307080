use mockall::mock;
use rvdbg_core::soc::traits::Device;

mock! {
    pub BusDevice {
        pub fn address_range(&self) -> (u32, u32);
        pub fn read_u8(&mut self, offset: u32) -> u8;
        pub fn write_u8(&mut self, offset: u32, val: u8);
        pub fn read_u32(&mut self, offset: u32) -> u32;
        pub fn write_u32(&mut self, offset: u32, val: u32);
    }
}

/// Bus-attachable wrapper around the mock; expectations are checked on drop.
pub struct MockedDevice {
    pub mock: MockBusDevice,
    name: &'static str,
}

impl MockedDevice {
    pub fn new(mock: MockBusDevice, name: &'static str) -> Self {
        Self { mock, name }
    }
}

impl Device for MockedDevice {
    fn name(&self) -> &str {
        self.name
    }

    fn address_range(&self) -> (u32, u32) {
        self.mock.address_range()
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.mock.read_u8(offset)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.mock.write_u8(offset, val);
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        self.mock.read_u32(offset)
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.mock.write_u32(offset, val);
    }
}
