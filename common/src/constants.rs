// Value on the data bus when nothing drives it for a port read.
pub const DEFAULT_READ: u8 = 0;

// RST 38h under IM 0, the last table entry under IM 2.
pub const DEFAULT_VECTOR: u8 = 0xff;

// RST p is encoded 0b11ppp111.
pub const RST_BASE: u8 = 0o307;
pub const RST_MASK: u8 = 0o307;
pub const RST_TARGET_MASK: u8 = 0o070;

// Fixed restart target for IM 1.
pub const IM1_TARGET: u16 = 0x0038;
