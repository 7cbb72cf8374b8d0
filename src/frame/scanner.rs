use std::mem;

use super::{
	FRAME_END,
	FRAME_START,
};

/// Byte-wise frame detection.
///
/// Starts `Outside`; a `<` always (re)starts a frame, so only the last
/// `<` before a `=` counts.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Scanner {
	Outside,
	Inside(Vec<u8>),
}

impl Default for Scanner {
	fn default() -> Self {
		Scanner::Outside
	}
}

impl Scanner {
	pub fn new() -> Self {
		Scanner::Outside
	}

	/// Feed next byte; returns the payload when the byte completed a frame.
	pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
		match byte {
			FRAME_START => {
				if let Scanner::Inside(ref partial) = *self {
					trace!("dropping unterminated frame {:?}", String::from_utf8_lossy(partial));
				}
				*self = Scanner::Inside(Vec::new());
				None
			},
			FRAME_END => match mem::replace(self, Scanner::Outside) {
				Scanner::Inside(payload) => Some(payload),
				Scanner::Outside => None,
			},
			_ => {
				if let Scanner::Inside(ref mut payload) = *self {
					payload.push(byte);
				}
				None
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scan_all(input: &[u8]) -> Vec<Vec<u8>> {
		let mut scanner = Scanner::new();
		input.iter().filter_map(|&b| scanner.push(b)).collect()
	}

	#[test]
	fn single_frame() {
		assert_eq!(scan_all(b"<HELLO="), vec![b"HELLO".to_vec()]);
	}

	#[test]
	fn empty_frame() {
		assert_eq!(scan_all(b"<="), vec![Vec::new()]);
	}

	#[test]
	fn noise_before_start_is_dropped() {
		assert_eq!(scan_all(b"\x00garbage\r\n<OK="), vec![b"OK".to_vec()]);
	}

	#[test]
	fn last_start_marker_wins() {
		assert_eq!(scan_all(b"<0:1<2:AB="), vec![b"2:AB".to_vec()]);
	}

	#[test]
	fn end_marker_outside_frame_is_noise() {
		assert_eq!(scan_all(b"==<OK=="), vec![b"OK".to_vec()]);
	}

	#[test]
	fn state_after_frame() {
		let mut scanner = Scanner::new();
		assert_eq!(scanner, Scanner::Outside);
		assert_eq!(scanner.push(b'<'), None);
		assert_eq!(scanner, Scanner::Inside(Vec::new()));
		assert_eq!(scanner.push(b'x'), None);
		assert_eq!(scanner, Scanner::Inside(b"x".to_vec()));
		assert_eq!(scanner.push(b'='), Some(b"x".to_vec()));
		assert_eq!(scanner, Scanner::Outside);
		// bytes between frames are not kept
		assert_eq!(scanner.push(b'y'), None);
		assert_eq!(scanner, Scanner::Outside);
	}

	#[test]
	fn multiple_frames() {
		assert_eq!(
			scan_all(b"<0:FF=\r\n<1:00=<OK="),
			vec![b"0:FF".to_vec(), b"1:00".to_vec(), b"OK".to_vec()],
		);
	}
}
