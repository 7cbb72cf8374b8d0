/// Framing used by the programmer, in both directions:
///
/// - `<`: start of frame
/// - payload bytes
/// - `=`: end of frame
///
/// There is no escaping and no length prefix; payloads simply never
/// contain the marker bytes. Everything outside of `<` ... `=` is noise.

mod scanner;
mod transport;

pub const FRAME_START: u8 = b'<';
pub const FRAME_END: u8 = b'=';

pub use self::scanner::Scanner;

pub use self::transport::{
	FrameTransport,
	encode_frame,
};
