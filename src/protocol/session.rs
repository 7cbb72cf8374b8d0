use std::fmt;
use std::io::{
	Read,
	Write,
};

use crate::error::{
	PResult,
	ProtocolError,
};
use crate::frame::FrameTransport;

use super::{
	Command,
	HELLO,
	MAX_IMAGE_LEN,
	RecordDump,
	Rendering,
	Response,
};

/// Connection to the programmer for the duration of one run.
///
/// Owns the port exclusively; all operations run one command at a time
/// and only return after the programmer sent `OK` or `ERROR` (or the
/// transport failed). Progress is printed to `out`.
pub struct Session<P, O> {
	transport: FrameTransport<P>,
	out: O,
	dump: RecordDump,
}

impl<P, O> Session<P, O>
where
	P: Read + Write,
	O: Write,
{
	/// Drops stale data on the port and runs the handshake.
	pub fn open(port: P, out: O) -> PResult<Self> {
		let mut transport = FrameTransport::new(port);
		let stale = transport.discard_pending();
		if stale > 0 {
			debug!("discarded {} stale bytes", stale);
		}

		let mut session = Session {
			transport,
			out,
			dump: RecordDump::new(),
		};
		session.check_connection()?;
		info!("Programmer connected");
		Ok(session)
	}

	pub fn into_inner(self) -> (P, O) {
		(self.transport.into_inner(), self.out)
	}

	pub fn port(&self) -> &P {
		self.transport.get_ref()
	}

	pub fn output(&self) -> &O {
		&self.out
	}

	/// Sends `H` and expects exactly `HELLO` back.
	pub fn check_connection(&mut self) -> PResult<()> {
		let command = Command::Hello;
		self.transport.write_frame(command.code(), &command.argument())
			.map_err(ProtocolError::ConnectionTransport)?;
		let payload = self.transport.read_frame().map_err(ProtocolError::ConnectionTransport)?;
		if payload != HELLO {
			return Err(ProtocolError::Connection {
				payload: String::from_utf8_lossy(&payload).into_owned(),
			});
		}
		Ok(())
	}

	/// Reads all cells; returns the number of received records.
	pub fn read_eeprom(&mut self) -> PResult<usize> {
		self.print(format_args!("Reading EEPROM...\n"))?;
		let count = self.run_simple_command(Command::ReadAll)?;
		self.print(format_args!("\nEEPROM read ({} bytes)\n", count))?;
		Ok(count)
	}

	/// Writes `image` starting at address 0, one acknowledged byte at a
	/// time. Stops at the first failure; already written bytes stay.
	pub fn write_eeprom(&mut self, image: &[u8]) -> PResult<()> {
		if image.len() > MAX_IMAGE_LEN {
			return Err(ProtocolError::ImageTooLarge { len: image.len() });
		}

		self.print(format_args!("Writing {} bytes to EEPROM...\n", image.len()))?;
		for (address, &data) in image.iter().enumerate() {
			let command = Command::Write {
				address: address as u16,
				data,
			};
			self.run_simple_command(command)?;
		}
		self.print(format_args!("\nEEPROM written\n"))?;
		Ok(())
	}

	pub fn clear_eeprom(&mut self) -> PResult<usize> {
		self.print(format_args!("Clearing EEPROM...\n"))?;
		let count = self.run_simple_command(Command::Clear)?;
		self.print(format_args!("\nEEPROM cleared\n"))?;
		Ok(count)
	}

	pub fn lock_eeprom(&mut self) -> PResult<()> {
		self.print(format_args!("Locking EEPROM...\n"))?;
		self.run_simple_command(Command::Lock)?;
		self.print(format_args!("\nEEPROM locked\n"))?;
		Ok(())
	}

	pub fn unlock_eeprom(&mut self) -> PResult<()> {
		self.print(format_args!("Unlocking EEPROM...\n"))?;
		self.run_simple_command(Command::Unlock)?;
		self.print(format_args!("\nEEPROM unlocked\n"))?;
		Ok(())
	}

	/// Sends `command` and prints the records of its answer until `OK`
	/// (returns the record count) or `ERROR`.
	pub fn run_simple_command(&mut self, command: Command) -> PResult<usize> {
		debug!("sending {}", command);
		self.transport.write_frame(command.code(), &command.argument())
			.map_err(ProtocolError::Transport)?;
		let count = self.drain_records(command, command.rendering())?;
		debug!("{} done ({} records)", command, count);
		Ok(count)
	}

	fn drain_records(&mut self, command: Command, rendering: Rendering) -> PResult<usize> {
		self.dump.reset();
		let mut count = 0usize;
		loop {
			let payload = self.transport.read_frame().map_err(ProtocolError::Transport)?;
			let (address, data) = match Response::parse(&payload)? {
				Response::Ok => return Ok(count),
				Response::Error => return Err(ProtocolError::Device { command }),
				Response::Record { address, data } => (address, data),
			};
			let data = rendering.render(&data);
			self.dump.write_record(&mut self.out, &address, &data)
				.and_then(|()| self.out.flush())
				.map_err(ProtocolError::Output)?;
			count += 1;
		}
	}

	fn print(&mut self, args: fmt::Arguments) -> PResult<()> {
		self.out.write_fmt(args)
			.and_then(|()| self.out.flush())
			.map_err(ProtocolError::Output)
	}
}
