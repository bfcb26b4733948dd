use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::aosong::{validate_options, Error, Options, RawReading, RawSensor, SetupError};
use crate::aosong::{DEFAULT_ADDRESS, DEFAULT_OPTIONS};
use crate::checksum::dht12_parity;

/// Register holding the first byte of humidity. Writing it triggers a measurement.
const HUMIDITY_REGISTER: u8 = 0x00;
/// Humidity integer and decimal, temperature integer and decimal, parity.
const RESPONSE_LEN: usize = 5;
const SIGN_BIT: u8 = 0x80;

/// Driver for the DHT12 over I2C.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dht12 {
    address: u8,
    verify_parity: bool,
}

impl Default for Dht12 {
    fn default() -> Dht12 {
        Dht12 {
            address: DEFAULT_ADDRESS,
            verify_parity: DEFAULT_OPTIONS.verify_parity,
        }
    }
}

impl Dht12 {
    /// Constructs a DHT12 driver. If `options` is `None`, then the default options are used (see
    /// [`DEFAULT_OPTIONS`]).
    ///
    /// The parity byte sent by the sensor is only checked if [`Options::verify_parity`] is set.
    pub fn new(options: Option<Options>) -> Result<Dht12, SetupError> {
        let options = validate_options(options)?;
        Ok(Dht12 {
            address: options.address,
            verify_parity: options.verify_parity,
        })
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

impl RawSensor for Dht12 {
    fn read_raw<I2C, D>(
        &self,
        i2c: &mut I2C,
        _delay: &mut D,
    ) -> Result<RawReading, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        i2c.write(self.address, &[HUMIDITY_REGISTER])?;
        let mut bytes = [0u8; RESPONSE_LEN];
        i2c.read(self.address, &mut bytes)?;

        if self.verify_parity {
            let calculated = dht12_parity(&bytes[..4]);
            if calculated != bytes[4] {
                return Err(Error::ChecksumMismatch {
                    expected: bytes[4] as u16,
                    calculated: calculated as u16,
                });
            }
        }
        Ok(decode(&bytes))
    }
}

fn decode(bytes: &[u8; RESPONSE_LEN]) -> RawReading {
    let humidity_x10 = bytes[0] as i16 * 10 + bytes[1] as i16;
    let magnitude = (bytes[2] & !SIGN_BIT) as i16 * 10 + bytes[3] as i16;
    let temperature_x10 = if bytes[2] & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    };
    RawReading {
        humidity_x10,
        temperature_x10,
    }
}
