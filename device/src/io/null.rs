use crate::io::IoDevice;

/// A device that overrides nothing. Useful for unpopulated ports, and as the
/// baseline every real device's defaults must match.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullDevice;

impl IoDevice for NullDevice {}
