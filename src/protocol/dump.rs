use std::io::{
	self,
	Write,
};

const COLUMNS: usize = 16;
const HALF_LINE: usize = COLUMNS / 2;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rendering {
	/// hex byte tokens printed as two uppercase digits, anything else as received
	Hex,
	/// data token printed as received
	Raw,
}

impl Rendering {
	pub fn render(self, token: &str) -> String {
		match self {
			Rendering::Hex => match parse_hex_byte(token) {
				Some(b) => format!("{:02X}", b),
				None => token.to_owned(),
			},
			Rendering::Raw => token.to_owned(),
		}
	}
}

fn parse_hex_byte(token: &str) -> Option<u8> {
	if token.is_empty() || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	u8::from_str_radix(token, 16).ok()
}

/// Prints records as lines of 16 values, starting each line with the
/// address of its first record:
///
/// ```text
/// 0000:  FF FF FF FF FF FF FF FF  FF FF FF FF FF FF FF FF
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RecordDump {
	column: usize,
}

impl RecordDump {
	pub fn new() -> Self {
		RecordDump { column: 0 }
	}

	pub fn reset(&mut self) {
		self.column = 0;
	}

	pub fn write_record<W: Write + ?Sized>(&mut self, out: &mut W, address: &str, data: &str) -> io::Result<()> {
		if self.column == 0 {
			write!(out, "\n{}: ", address)?;
		}
		if self.column == HALF_LINE {
			write!(out, " ")?;
		}
		write!(out, " {}", data)?;
		self.column = (self.column + 1) % COLUMNS;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_rendering() {
		assert_eq!(Rendering::Hex.render("AB"), "AB");
		assert_eq!(Rendering::Hex.render("f"), "0F");
		assert_eq!(Rendering::Hex.render("00ff"), "FF");
	}

	#[test]
	fn hex_rendering_falls_back_to_token() {
		assert_eq!(Rendering::Hex.render("100"), "100");
		assert_eq!(Rendering::Hex.render("+1"), "+1");
		assert_eq!(Rendering::Hex.render("ZZ"), "ZZ");
		assert_eq!(Rendering::Hex.render("\u{fffd}"), "\u{fffd}");
		assert_eq!(Rendering::Hex.render(""), "");
	}

	#[test]
	fn raw_rendering() {
		assert_eq!(Rendering::Raw.render("255"), "255");
		assert_eq!(Rendering::Raw.render("f"), "f");
		assert_eq!(Rendering::Raw.render(""), "");
	}

	#[test]
	fn one_full_line() {
		let mut dump = RecordDump::new();
		let mut out = Vec::new();
		for i in 0..16 {
			dump.write_record(&mut out, &format!("{:04X}", i), &format!("{:02X}", i)).unwrap();
		}
		assert_eq!(
			String::from_utf8(out).unwrap(),
			"\n0000:  00 01 02 03 04 05 06 07  08 09 0A 0B 0C 0D 0E 0F",
		);
	}

	#[test]
	fn wraps_after_sixteen() {
		let mut dump = RecordDump::new();
		let mut out = Vec::new();
		for i in 0..17 {
			dump.write_record(&mut out, &i.to_string(), "FF").unwrap();
		}
		let text = String::from_utf8(out).unwrap();
		let lines: Vec<&str> = text.split('\n').collect();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0], "");
		assert!(lines[1].starts_with("0:  FF"));
		assert_eq!(lines[2], "16:  FF");
	}

	#[test]
	fn reset_starts_new_line() {
		let mut dump = RecordDump::new();
		let mut out = Vec::new();
		dump.write_record(&mut out, "0", "1").unwrap();
		dump.reset();
		dump.write_record(&mut out, "1", "2").unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "\n0:  1\n1:  2");
	}
}
