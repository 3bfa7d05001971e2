pub mod constants;
pub mod port;
