pub mod null;
pub mod traced;

use common::constants::{DEFAULT_READ, DEFAULT_VECTOR};

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

/// A peripheral on the CPU's I/O address space.
///
/// Every method has an inert default, so a device overrides only what it
/// actually does: reads float to `0`, writes are dropped, and the interrupt
/// vector is `0xFF`.
///
/// None of these may fail, block, or do unbounded work. The CPU calls them
/// synchronously in program order, once per bus cycle. A device backed by
/// real host I/O has to buffer internally and answer from the buffer.
///
/// There's no `Send` bound: a single CPU thread drives every call. Callers
/// that move a device across threads ask for `IoDevice + Send` themselves.
pub trait IoDevice {
    /// Handle an `IN`. `address` is the full 16-bit bus address, unmasked;
    /// the port is conventionally the low byte (see
    /// [`PortAddr`](common::port::PortAddr)). Side effects such as clearing a
    /// status flag are up to the device.
    fn io_read(&mut self, _address: u16) -> u8 {
        DEFAULT_READ
    }

    /// Handle an `OUT`. Same address convention as [`IoDevice::io_read`].
    fn io_write(&mut self, _address: u16, _data: u8) {}

    /// The byte this device puts on the data bus during interrupt
    /// acknowledge.
    ///
    /// Under IM 0 the CPU executes it as an instruction, normally an
    /// `RST p` (`0xC7..=0xFF`); the default `0xFF` is `RST 38h`. Under IM 2 it
    /// is the low byte of the vector table address, `(I << 8) | vector`. The
    /// device never sees `I` or the current mode: the same byte is returned
    /// either way and [`crate::interrupt::respond`] does the interpretation.
    ///
    /// There's no way to say "nothing pending". Whoever arbitrates between
    /// devices should only ask the one it is acknowledging.
    fn interrupt_vector(&mut self) -> u8 {
        DEFAULT_VECTOR
    }
}

impl<D: IoDevice + ?Sized> IoDevice for &mut D {
    fn io_read(&mut self, address: u16) -> u8 {
        (**self).io_read(address)
    }

    fn io_write(&mut self, address: u16, data: u8) {
        (**self).io_write(address, data)
    }

    fn interrupt_vector(&mut self) -> u8 {
        (**self).interrupt_vector()
    }
}

impl<D: IoDevice + ?Sized> IoDevice for Box<D> {
    fn io_read(&mut self, address: u16) -> u8 {
        (**self).io_read(address)
    }

    fn io_write(&mut self, address: u16, data: u8) {
        (**self).io_write(address, data)
    }

    fn interrupt_vector(&mut self) -> u8 {
        (**self).interrupt_vector()
    }
}

// Lets the bus router and the interrupt controller hold the same device.
impl<D: IoDevice + ?Sized> IoDevice for Rc<RefCell<D>> {
    fn io_read(&mut self, address: u16) -> u8 {
        self.borrow_mut().io_read(address)
    }

    fn io_write(&mut self, address: u16, data: u8) {
        self.borrow_mut().io_write(address, data)
    }

    fn interrupt_vector(&mut self) -> u8 {
        self.borrow_mut().interrupt_vector()
    }
}

// Same, when the device is also touched from another thread.
impl<D: IoDevice + Send + ?Sized> IoDevice for Arc<Mutex<D>> {
    fn io_read(&mut self, address: u16) -> u8 {
        lock(self).io_read(address)
    }

    fn io_write(&mut self, address: u16, data: u8) {
        lock(self).io_write(address, data)
    }

    fn interrupt_vector(&mut self) -> u8 {
        lock(self).interrupt_vector()
    }
}

// A bus access can't fail, so a device poisoned by a panic elsewhere keeps
// answering with whatever state it was left in.
fn lock<D: ?Sized>(dev: &Mutex<D>) -> MutexGuard<'_, D> {
    dev.lock().unwrap_or_else(|poisoned| {
        warn!("I/O device lock poisoned, continuing with its last state");
        poisoned.into_inner()
    })
}
