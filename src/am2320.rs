use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::aosong::{validate_options, Error, Options, RawReading, RawSensor, SetupError};
use crate::aosong::DEFAULT_ADDRESS;
use crate::checksum::am2320_crc16;
use crate::codec::{get_s16_be, get_u16_be, get_u16_le};

/// Modbus function code for reading registers.
const READ_REGISTERS: u8 = 0x03;
/// First register of relative humidity.
const HUMIDITY_REGISTER: u8 = 0x00;
/// Humidity and temperature, two registers each.
const REGISTER_COUNT: u8 = 0x04;
/// Function code, byte count, 4 data bytes and the CRC.
const RESPONSE_LEN: usize = 8;
const SIGN_FLAG: i16 = i16::MIN;

/// The sensor must receive a command within 3ms of being woken.
const WAKE_DELAY_US: u32 = 800;
/// Time the sensor needs between the read command and its data being ready.
const SETTLE_DELAY_US: u32 = 1_600;

/// Driver for the AM2320 over I2C.
///
/// The sensor sleeps between reads and NACKs the transaction that wakes it, so every read first
/// sends an empty write whose result is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Am2320 {
    address: u8,
}

impl Default for Am2320 {
    fn default() -> Am2320 {
        Am2320 {
            address: DEFAULT_ADDRESS,
        }
    }
}

impl Am2320 {
    /// Constructs an AM2320 driver. If `options` is `None`, then the default options are used
    /// (see [`crate::aosong::DEFAULT_OPTIONS`]).
    pub fn new(options: Option<Options>) -> Result<Am2320, SetupError> {
        let options = validate_options(options)?;
        Ok(Am2320 {
            address: options.address,
        })
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

impl RawSensor for Am2320 {
    fn read_raw<I2C, D>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
    ) -> Result<RawReading, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        // Expected to fail while the sensor is asleep.
        let _ = i2c.write(self.address, &[]);
        delay.delay_us(WAKE_DELAY_US);

        i2c.write(
            self.address,
            &[READ_REGISTERS, HUMIDITY_REGISTER, REGISTER_COUNT],
        )?;
        delay.delay_us(SETTLE_DELAY_US);

        let mut bytes = [0u8; RESPONSE_LEN];
        i2c.read(self.address, &mut bytes)?;
        decode(&bytes)
    }
}

fn decode<TIoError>(bytes: &[u8; RESPONSE_LEN]) -> Result<RawReading, Error<TIoError>>
where
    TIoError: core::fmt::Debug,
{
    let expected = get_u16_le(&bytes[6..]);
    let calculated = am2320_crc16(&bytes[..6]);
    if expected != calculated {
        return Err(Error::ChecksumMismatch {
            expected,
            calculated,
        });
    }
    if bytes[0] != READ_REGISTERS || bytes[1] != REGISTER_COUNT {
        return Err(Error::UnexpectedResponse);
    }

    let humidity_x10 = get_u16_be(&bytes[2..]) as i16;
    let temperature = get_s16_be(&bytes[4..]);
    let temperature_x10 = if temperature & SIGN_FLAG != 0 {
        -(temperature & !SIGN_FLAG)
    } else {
        temperature
    };
    Ok(RawReading {
        humidity_x10,
        temperature_x10,
    })
}
