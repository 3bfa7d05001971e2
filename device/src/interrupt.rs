use crate::io::IoDevice;

use common::constants::{IM1_TARGET, RST_BASE, RST_MASK, RST_TARGET_MASK};
use common::port::PortAddr;

use std::fmt;

use derive_more::{IsVariant, Unwrap};
use log::debug;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InterruptError {
    #[error("Invalid interrupt mode {0}")]
    InvalidMode(u8),

    #[error("Opcode 0x{0:02x} is not a restart")]
    NotRestart(u8),
}

////////////////////////////////////////////////////////////////////////////////

/// The mode selected by `IM 0`/`IM 1`/`IM 2`. Held by the CPU, never by a
/// device. Reset leaves the CPU in IM 0.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq, Default)]
pub enum InterruptMode {
    #[default]
    Im0 = 0,
    Im1,
    Im2,
}

impl TryFrom<u8> for InterruptMode {
    type Error = InterruptError;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        InterruptMode::from_u8(val).ok_or(InterruptError::InvalidMode(val))
    }
}

impl fmt::Display for InterruptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IM {}", *self as u8)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// One of the eight `RST p` instructions. The discriminant is `p / 8`.
#[derive(Debug, Clone, Copy, FromPrimitive, ToPrimitive, PartialEq, Eq)]
pub enum Restart {
    Rst00 = 0,
    Rst08,
    Rst10,
    Rst18,
    Rst20,
    Rst28,
    Rst30,
    Rst38,
}

impl Restart {
    const SHIFT: u8 = 3;

    pub fn decode(op: u8) -> Result<Restart, InterruptError> {
        if op & RST_MASK != RST_BASE {
            return Err(InterruptError::NotRestart(op));
        }
        Restart::from_u8((op & RST_TARGET_MASK) >> Self::SHIFT)
            .ok_or(InterruptError::NotRestart(op))
    }

    pub fn opcode(self) -> u8 {
        RST_BASE | ((self as u8) << Self::SHIFT)
    }

    // Address the restart calls.
    pub fn target(self) -> u16 {
        ((self as u8) << Self::SHIFT) as u16
    }
}

impl fmt::Display for Restart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RST {:02X}h", self.target())
    }
}

////////////////////////////////////////////////////////////////////////////////

/// What the CPU does after accepting a maskable interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant, Unwrap)]
pub enum InterruptResponse {
    // IM 0: execute this opcode as if fetched.
    Execute(u8),
    // IM 1: call a fixed address. No device is asked.
    Call(u16),
    // IM 2: read the handler address from this table entry.
    VectorTable(u16),
}

impl InterruptResponse {
    /// The restart an IM 0 response executes, if the device sent one.
    pub fn restart(&self) -> Option<Restart> {
        match self {
            InterruptResponse::Execute(op) => Restart::decode(*op).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for InterruptResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterruptResponse::Execute(op) => match Restart::decode(*op) {
                Ok(rst) => {
                    write!(f, "IM 0: execute 0x{op:02x} ({rst} -> 0x{:04x})", rst.target())
                }
                Err(_) => write!(f, "IM 0: execute 0x{op:02x}"),
            },
            InterruptResponse::Call(addr) => write!(f, "IM 1: call 0x{addr:04x}"),
            InterruptResponse::VectorTable(addr) => {
                write!(f, "IM 2: vector table at 0x{addr:04x}")
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// IM 2 table entry: `I` supplies the high byte, the device the low byte.
pub fn vector_table_address(interrupt_base: u8, vector: u8) -> u16 {
    u16::from_parts(interrupt_base, vector)
}

/// Run the acknowledge cycle against `device` and work out where the CPU goes
/// next. The device is only asked for its vector in IM 0 and IM 2.
pub fn respond<D: IoDevice + ?Sized>(
    mode: InterruptMode,
    device: &mut D,
    interrupt_base: u8,
) -> InterruptResponse {
    let resp = match mode {
        InterruptMode::Im0 => InterruptResponse::Execute(device.interrupt_vector()),
        InterruptMode::Im1 => InterruptResponse::Call(IM1_TARGET),
        InterruptMode::Im2 => {
            let vector = device.interrupt_vector();
            InterruptResponse::VectorTable(vector_table_address(interrupt_base, vector))
        }
    };
    debug!("Interrupt accepted: {resp}");
    resp
}
