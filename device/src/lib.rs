pub mod interrupt;
pub mod io;

pub use interrupt::{InterruptMode, InterruptResponse, Restart, respond};
pub use io::IoDevice;
pub use io::null::NullDevice;
pub use io::traced::Traced;
