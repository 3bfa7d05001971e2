// A 16-bit I/O address as seen on the address bus during IN/OUT. The low byte
// selects the port; the high byte carries whatever register the instruction
// put there (B for `IN r,(C)`, A for `IN A,(n)`).
pub trait PortAddr: Copy {
    fn select(self) -> u8;
    fn upper(self) -> u8;
    fn from_parts(upper: u8, select: u8) -> Self;
}

impl PortAddr for u16 {
    fn select(self) -> u8 {
        self as u8
    }

    fn upper(self) -> u8 {
        (self >> u8::BITS) as u8
    }

    fn from_parts(upper: u8, select: u8) -> Self {
        ((upper as u16) << u8::BITS) | select as u16
    }
}
