/// Command/response protocol of the EEPROM programmer.
///
/// Commands (host -> programmer, one letter plus optional binary argument):
/// - `H`: hello, answered by a single `HELLO` frame
/// - `R`: read all cells
/// - `W` + address (2 bytes, big endian) + data byte: write one cell
/// - `C`: clear (erase) all cells
/// - `L`: lock
/// - `U`: unlock
///
/// Except for `H` every command is answered by zero or more records
/// (`<address>:<data>`) followed by either `OK` or `ERROR`.

mod dump;
mod session;

use std::fmt;

use crate::error::{
	PResult,
	ProtocolError,
};

pub use self::dump::{
	RecordDump,
	Rendering,
};

pub use self::session::Session;

/// The write command can only address 16 bits.
pub const MAX_IMAGE_LEN: usize = 0x1_0000;

pub const HELLO: &[u8] = b"HELLO";
pub const OK: &[u8] = b"OK";
pub const ERROR: &[u8] = b"ERROR";

const RECORD_SEPARATOR: char = ':';

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Command {
	Hello,
	ReadAll,
	Write {
		address: u16,
		data: u8,
	},
	Clear,
	Lock,
	Unlock,
}

impl Command {
	pub fn code(&self) -> u8 {
		match self {
			Command::Hello => b'H',
			Command::ReadAll => b'R',
			Command::Write { .. } => b'W',
			Command::Clear => b'C',
			Command::Lock => b'L',
			Command::Unlock => b'U',
		}
	}

	pub fn argument(&self) -> Vec<u8> {
		match *self {
			Command::Write { address, data } => vec![
				(address >> 8) as u8,
				address as u8,
				data,
			],
			_ => Vec::new(),
		}
	}

	/// How data records in the answer to this command are printed.
	///
	/// Clearing is only supported by the older firmware, which sends
	/// the cell contents as plain text.
	pub fn rendering(&self) -> Rendering {
		match self {
			Command::Clear => Rendering::Raw,
			_ => Rendering::Hex,
		}
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Command::Hello => write!(f, "H (hello)"),
			Command::ReadAll => write!(f, "R (read)"),
			Command::Write { address, data } => write!(f, "W (write 0x{:02x} @0x{:04x})", data, address),
			Command::Clear => write!(f, "C (clear)"),
			Command::Lock => write!(f, "L (lock)"),
			Command::Unlock => write!(f, "U (unlock)"),
		}
	}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Response {
	Ok,
	Error,
	Record {
		address: String,
		data: String,
	},
}

impl Response {
	/// Sentinels are checked first; everything else must be a record with
	/// exactly one `:`.
	pub fn parse(payload: &[u8]) -> PResult<Self> {
		if payload == OK {
			return Ok(Response::Ok);
		}
		if payload == ERROR {
			return Ok(Response::Error);
		}

		let text = String::from_utf8_lossy(payload);
		let mut parts = text.split(RECORD_SEPARATOR);
		match (parts.next(), parts.next(), parts.next()) {
			(Some(address), Some(data), None) => Ok(Response::Record {
				address: address.to_owned(),
				data: data.to_owned(),
			}),
			_ => Err(ProtocolError::InvalidResponse {
				payload: text.into_owned(),
			}),
		}
	}
}
