#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate eeprom_programmer;
use eeprom_programmer::*;

use std::fs;
use std::io;
use std::process::exit;

use eeprom_programmer::tty::SerialConfig;

fn get_param<T>(matches: &clap::ArgMatches, name: &str) -> AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid paramater {}: {}", name, e);
		e.context(msg).into()
	})
}

fn read_image(path: &str) -> AResult<Vec<u8>> {
	fs::read(path).map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("failed to read image {}: {}", path, e);
		e.context(msg).into()
	})
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (app_from_crate!())
		(@arg PORT: -p --port +takes_value +required "serial port the programmer is connected to")
		(@arg BAUD: -b --baud +takes_value default_value("115200") "baud rate to use")
		(@arg unlock: -u --unlock conflicts_with[lock] "unlock the EEPROM")
		(@arg clear: -c --clear "clear the EEPROM")
		(@arg IMAGE: -w --write +takes_value "write image file to the EEPROM, starting at address 0")
		(@arg read: -r --read "read and dump the whole EEPROM")
		(@arg lock: -l --lock "lock the EEPROM")
	).get_matches();

	let port_path = match matches.value_of("PORT") {
		Some(p) => p,
		None => bail!("missing parameter PORT"),
	};
	let mut baud_rate: u32 = get_param(&matches, "BAUD")?;
	if baud_rate == 0 {
		warn!("Invalid baud rate 0, using 9600");
		baud_rate = 9600;
	}

	// load image before touching the device
	let image = match matches.value_of("IMAGE") {
		Some(path) => Some(read_image(path)?),
		None => None,
	};

	let config = SerialConfig {
		baud_rate,
		..SerialConfig::default()
	};
	let port = tty::open_serial_port(port_path, &config)?;
	info!("{}: opened with {} baud", port_path, baud_rate);

	let stdout = io::stdout();
	let mut session = Session::open(port, stdout.lock())?;

	if matches.is_present("unlock") {
		session.unlock_eeprom()?;
	}
	if matches.is_present("clear") {
		session.clear_eeprom()?;
	}
	if let Some(image) = image {
		session.write_eeprom(&image)?;
	}
	if matches.is_present("read") {
		session.read_eeprom()?;
	}
	if matches.is_present("lock") {
		session.lock_eeprom()?;
	}

	Ok(())
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
