
use dev_lib::interrupt::InterruptError;
use dev_lib::{InterruptMode, IoDevice, Traced, respond};

use std::num::ParseIntError;

use clap::Parser;
use thiserror::Error;


/// Z80 interrupt vector decoder
#[derive(Parser)]
struct Args {
    /// Byte the device places on the bus (e.g. 0xc7, 34h, 255)
    #[arg(value_parser = parse_byte)]
    vector: u8,

    /// Interrupt mode (0, 1 or 2)
    #[arg(long, default_value_t = InterruptMode::Im2, value_parser = parse_mode)]
    mode: InterruptMode,

    /// Contents of the I register
    #[arg(long, default_value_t = 0, value_parser = parse_byte)]
    base: u8,
}

// Stands in for whichever device won arbitration.
struct Vectored(u8);

impl IoDevice for Vectored {
    fn interrupt_vector(&mut self) -> u8 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
enum ParseError {
    #[error("Empty value")]
    Empty,

    #[error("Unexpected sign in '{0}'")]
    Signed(String),

    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Mode(#[from] InterruptError),
}

fn parse_digits(digits: &str, radix: u32) -> Result<u8, ParseError> {
    // from_str_radix takes a leading '+'.
    match digits.chars().next() {
        None => Err(ParseError::Empty),
        Some('+') | Some('-') => Err(ParseError::Signed(digits.to_string())),
        Some(_) => Ok(u8::from_str_radix(digits, radix)?),
    }
}

fn parse_byte(s: &str) -> Result<u8, ParseError> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        parse_digits(hex, 16)
    } else if let Some(hex) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
        parse_digits(hex, 16)
    } else {
        parse_digits(s, 10)
    }
}

// Takes "2" as well as the "IM 2" the default is displayed as.
fn parse_mode(s: &str) -> Result<InterruptMode, ParseError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("IM")
        .or_else(|| s.strip_prefix("im"))
        .unwrap_or(s)
        .trim_start();
    Ok(InterruptMode::try_from(parse_digits(digits, 10)?)?)
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut dev = Traced::new("cli", Vectored(args.vector));
    let resp = respond(args.mode, &mut dev, args.base);
    println!("{resp}");
}
