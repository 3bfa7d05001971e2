use crate::io::IoDevice;

use common::port::PortAddr;

use log::trace;

/// Wraps a device and logs every access at trace level. Values pass through
/// untouched.
pub struct Traced<D> {
    name: &'static str,
    inner: D,
}

impl<D: IoDevice> Traced<D> {
    pub fn new(name: &'static str, inner: D) -> Self {
        Traced { name, inner }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: IoDevice> IoDevice for Traced<D> {
    fn io_read(&mut self, address: u16) -> u8 {
        let val = self.inner.io_read(address);
        trace!(
            "{}: IN  0x{address:04x} (port 0x{:02x}) -> 0x{val:02x}",
            self.name,
            address.select(),
        );
        val
    }

    fn io_write(&mut self, address: u16, data: u8) {
        trace!(
            "{}: OUT 0x{address:04x} (port 0x{:02x}) <- 0x{data:02x}",
            self.name,
            address.select(),
        );
        self.inner.io_write(address, data);
    }

    fn interrupt_vector(&mut self) -> u8 {
        let vector = self.inner.interrupt_vector();
        trace!("{}: INTA -> 0x{vector:02x}", self.name);
        vector
    }
}
