use std::io::{
	self,
	Read,
	Write,
};

use super::{
	FRAME_END,
	FRAME_START,
	Scanner,
};

// stale data is read in chunks; frames themselves are read byte by byte
const DISCARD_CHUNK: usize = 255;

pub fn encode_frame(code: u8, argument: &[u8]) -> Vec<u8> {
	let mut frame = Vec::with_capacity(argument.len() + 3);
	frame.push(FRAME_START);
	frame.push(code);
	frame.extend_from_slice(argument);
	frame.push(FRAME_END);
	frame
}

/// Frames on top of a byte stream (usually a serial port).
///
/// A read returning 0 bytes means the port's read timeout elapsed and is
/// reported as `TimedOut`.
pub struct FrameTransport<P> {
	port: P,
}

impl<P: Read + Write> FrameTransport<P> {
	pub fn new(port: P) -> Self {
		FrameTransport { port }
	}

	pub fn get_ref(&self) -> &P {
		&self.port
	}

	pub fn into_inner(self) -> P {
		self.port
	}

	fn read_byte(&mut self) -> io::Result<u8> {
		let mut buf = [0u8];
		loop {
			match self.port.read(&mut buf) {
				Ok(0) => return Err(io::Error::new(io::ErrorKind::TimedOut, "timeout waiting for data from programmer")),
				Ok(_) => return Ok(buf[0]),
				Err(ref e) if e.kind() == io::ErrorKind::Interrupted => (),
				Err(e) => return Err(e),
			}
		}
	}

	/// Blocks until a complete frame was received and returns its payload.
	pub fn read_frame(&mut self) -> io::Result<Vec<u8>> {
		let mut scanner = Scanner::new();
		loop {
			let byte = self.read_byte()?;
			if let Some(payload) = scanner.push(byte) {
				trace!("<- {:?}", String::from_utf8_lossy(&payload));
				return Ok(payload);
			}
		}
	}

	/// Sends `<`, the command code, the argument and `=` in one write.
	pub fn write_frame(&mut self, code: u8, argument: &[u8]) -> io::Result<()> {
		let frame = encode_frame(code, argument);
		trace!("-> {:?}", String::from_utf8_lossy(&frame));
		self.port.write_all(&frame)?;
		self.port.flush()
	}

	/// Reads and drops everything the port has buffered, until a read
	/// returns nothing or fails. Errors are ignored.
	///
	/// Returns the number of dropped bytes.
	pub fn discard_pending(&mut self) -> usize {
		let mut buf = [0u8; DISCARD_CHUNK];
		let mut discarded = 0;
		loop {
			match self.port.read(&mut buf) {
				Ok(0) => break,
				Ok(n) => discarded += n,
				Err(e) => {
					trace!("stopped discarding stale data: {}", e);
					break;
				},
			}
		}
		discarded
	}
}
