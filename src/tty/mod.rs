use std::time::Duration;

use serialport::{
	DataBits,
	FlowControl,
	Parity,
	StopBits,
};

pub use serialport::SerialPort;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Line settings; data format is always 8N1 without flow control.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SerialConfig {
	pub baud_rate: u32,
	/// how long a single read waits for data
	pub read_timeout: Duration,
}

impl Default for SerialConfig {
	fn default() -> Self {
		SerialConfig {
			baud_rate: DEFAULT_BAUD_RATE,
			read_timeout: DEFAULT_READ_TIMEOUT,
		}
	}
}

/// Opens the programmer's port. Reads fail with `TimedOut` when nothing
/// arrived within the read timeout; the port is closed on drop.
pub fn open_serial_port(path: &str, config: &SerialConfig) -> crate::AResult<Box<dyn SerialPort>> {
	with_context!(("open serial port {}", path), {
		let port = serialport::new(path, config.baud_rate)
			.data_bits(DataBits::Eight)
			.parity(Parity::None)
			.stop_bits(StopBits::One)
			.flow_control(FlowControl::None)
			.timeout(config.read_timeout)
			.open()?;

		debug!("{}: configured {} baud 8N1, read timeout {:?}", path, config.baud_rate, config.read_timeout);

		Ok(port)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = SerialConfig::default();
		assert_eq!(config.baud_rate, 115_200);
		assert_eq!(config.read_timeout, Duration::from_secs(2));
	}

	#[test]
	fn missing_device() {
		let config = SerialConfig::default();
		let err = match open_serial_port("/nonexistent/tty-for-eeprom-programmer", &config) {
			Err(e) => e,
			Ok(_) => panic!("opened a nonexistent device"),
		};
		assert!(err.to_string().starts_with("open serial port /nonexistent/tty-for-eeprom-programmer: "));
	}
}
