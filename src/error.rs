// failure_derive emits its impls inside a function-local const
#![allow(non_local_definitions)]

use std::io;

use failure::Fail;

use crate::protocol::Command;

pub type PResult<T> = Result<T, ProtocolError>;

/// Everything that can end a protocol exchange.
///
/// All of them are fatal for the running operation; nothing is retried.
#[derive(Debug, Fail)]
pub enum ProtocolError {
	/// Handshake didn't answer with `HELLO`.
	#[fail(display = "programmer not responding: got {:?} instead of \"HELLO\"", payload)]
	Connection {
		payload: String,
	},

	/// Transport failed while waiting for the handshake answer.
	#[fail(display = "programmer not responding: {}", _0)]
	ConnectionTransport(#[cause] io::Error),

	/// Reading from or writing to the port failed (including read timeouts).
	#[fail(display = "transport error: {}", _0)]
	Transport(#[cause] io::Error),

	/// Programmer answered a command with `ERROR`.
	#[fail(display = "programmer reported an error for command {}", command)]
	Device {
		command: Command,
	},

	/// Frame where a record or sentinel was expected, but it was neither.
	#[fail(display = "invalid response {:?}", payload)]
	InvalidResponse {
		payload: String,
	},

	/// Image doesn't fit into the 16-bit address space of the write command.
	#[fail(display = "image too large: {} bytes (at most 65536 bytes are addressable)", len)]
	ImageTooLarge {
		len: usize,
	},

	/// Writing progress output failed.
	#[fail(display = "failed writing output: {}", _0)]
	Output(#[cause] io::Error),
}

impl ProtocolError {
	/// Whether the handshake failed, independent of why.
	pub fn is_connection_error(&self) -> bool {
		match self {
			ProtocolError::Connection { .. } => true,
			ProtocolError::ConnectionTransport(_) => true,
			_ => false,
		}
	}
}
