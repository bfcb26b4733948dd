use core::convert::TryFrom;
use core::fmt;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::am2320::Am2320;
use crate::dht12::Dht12;

/// The I2C address both the DHT12 and the AM2320 answer on.
pub const DEFAULT_ADDRESS: u8 = 0x5C;

/// Name rendered for a raw model tag that does not belong to a supported sensor.
pub const UNKNOWN_MODEL_NAME: &str = "unknown";

#[derive(Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<TIoError>
where
    TIoError: fmt::Debug,
{
    /// Wrapped error from the I2C bus.
    #[error("I2C error: {0:?}")]
    Wrapped(TIoError),
    /// The checksum sent by the sensor does not match the one calculated from its data.
    #[error("checksum mismatch: received {expected:#06x}, calculated {calculated:#06x}")]
    ChecksumMismatch { expected: u16, calculated: u16 },
    /// The sensor's response passed its checksum but does not answer the command that was sent.
    #[error("unexpected response from sensor")]
    UnexpectedResponse,
}

impl<TIoError> Error<TIoError>
where
    TIoError: fmt::Debug,
{
    /// True if the bus transaction succeeded but the received data was corrupt.
    ///
    /// These errors are usually transient, so the read can be retried. A
    /// [`Error::Wrapped`] error more likely means the sensor is missing or miswired.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Error::ChecksumMismatch { .. } | Error::UnexpectedResponse
        )
    }
}

impl<TIoError> From<TIoError> for Error<TIoError>
where
    TIoError: fmt::Debug,
{
    fn from(error: TIoError) -> Error<TIoError> {
        Error::Wrapped(error)
    }
}

/// Errors constructing a sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// The raw tag does not name a supported sensor model.
    #[error("unsupported sensor model tag: {0}")]
    UnsupportedModel(u8),
    /// The address is not a usable 7-bit I2C address.
    #[error("invalid I2C address: {0:#04x}")]
    InvalidAddress(u8),
}

/// Supported Aosong humidity and temperature sensors.
///
/// The discriminants are the raw tags accepted by [`SensorModel::try_from`] and [`model_name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SensorModel {
    Dht12 = 0,
    Am2320 = 1,
}

impl SensorModel {
    pub fn name(self) -> &'static str {
        match self {
            SensorModel::Dht12 => "DHT12",
            SensorModel::Am2320 => "AM2320",
        }
    }

    pub fn default_address(self) -> u8 {
        DEFAULT_ADDRESS
    }
}

impl fmt::Display for SensorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for SensorModel {
    type Error = SetupError;

    fn try_from(tag: u8) -> Result<SensorModel, SetupError> {
        match tag {
            0 => Ok(SensorModel::Dht12),
            1 => Ok(SensorModel::Am2320),
            _ => Err(SetupError::UnsupportedModel(tag)),
        }
    }
}

/// Renders any raw model tag, falling back to [`UNKNOWN_MODEL_NAME`].
pub fn model_name(tag: u8) -> &'static str {
    SensorModel::try_from(tag)
        .map(SensorModel::name)
        .unwrap_or(UNKNOWN_MODEL_NAME)
}

pub trait Response {
    /// Relative humidity in percent.
    fn get_humidity(&self) -> f32;
    /// Temperature in degrees Celsius.
    fn get_temperature(&self) -> f32;
}

/// Humidity and temperature as read from the sensor, both multiplied by 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading {
    pub humidity_x10: i16,
    pub temperature_x10: i16,
}

impl Response for RawReading {
    fn get_humidity(&self) -> f32 {
        self.humidity_x10 as f32 / 10.0
    }

    fn get_temperature(&self) -> f32 {
        self.temperature_x10 as f32 / 10.0
    }
}

/// Relative humidity (%) and temperature (°C).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub humidity: f32,
    pub temperature: f32,
}

impl From<RawReading> for Reading {
    fn from(raw: RawReading) -> Reading {
        Reading {
            humidity: raw.get_humidity(),
            temperature: raw.get_temperature(),
        }
    }
}

impl Response for Reading {
    fn get_humidity(&self) -> f32 {
        self.humidity
    }

    fn get_temperature(&self) -> f32 {
        self.temperature
    }
}

/// A sensor driver that can take a single measurement.
///
/// Each call is a fresh set of bus transactions. Nothing is cached between calls, and callers
/// sharing one bus must serialize their reads.
pub trait RawSensor {
    fn read_raw<I2C, D>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
    ) -> Result<RawReading, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs;
}

/// Options to modify the behavior of a sensor driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Options {
    /// The sensor's 7-bit I2C address.
    pub address: u8,
    /// Checks the parity byte sent by a DHT12 and fails the read with
    /// [`Error::ChecksumMismatch`] if it does not match. Off by default. Ignored by the AM2320,
    /// whose CRC is always checked.
    pub verify_parity: bool,
}

pub const DEFAULT_OPTIONS: Options = Options {
    address: DEFAULT_ADDRESS,
    verify_parity: false,
};

impl Default for Options {
    fn default() -> Options {
        DEFAULT_OPTIONS
    }
}

/// Returns the given options, or the defaults if `None`, after checking they are usable.
pub(crate) fn validate_options(options: Option<Options>) -> Result<Options, SetupError> {
    let options = options.unwrap_or(DEFAULT_OPTIONS);
    // 0x00-0x07 and 0x78-0x7F are reserved.
    if !(0x08..=0x77).contains(&options.address) {
        return Err(SetupError::InvalidAddress(options.address));
    }
    Ok(options)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Driver {
    Dht12(Dht12),
    Am2320(Am2320),
}

/// A humidity and temperature sensor of either supported model.
///
/// The model is fixed at construction. The sensor does not own the I2C bus; it is borrowed for
/// each read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sensor {
    model: SensorModel,
    driver: Driver,
}

impl Sensor {
    /// Constructs a sensor of the given model using [`DEFAULT_OPTIONS`]. No I/O is performed.
    pub fn new(model: SensorModel) -> Sensor {
        let driver = match model {
            SensorModel::Dht12 => Driver::Dht12(Dht12::default()),
            SensorModel::Am2320 => Driver::Am2320(Am2320::default()),
        };
        Sensor { model, driver }
    }

    /// Constructs a sensor of the given model. If `options` is `None`, [`DEFAULT_OPTIONS`] is
    /// used.
    ///
    /// Returns [`SetupError::InvalidAddress`] if the address is not a usable 7-bit address.
    pub fn with_options(model: SensorModel, options: Option<Options>) -> Result<Sensor, SetupError> {
        let driver = match model {
            SensorModel::Dht12 => Driver::Dht12(Dht12::new(options)?),
            SensorModel::Am2320 => Driver::Am2320(Am2320::new(options)?),
        };
        Ok(Sensor { model, driver })
    }

    /// Constructs a sensor from a raw model tag using [`DEFAULT_OPTIONS`].
    ///
    /// Returns [`SetupError::UnsupportedModel`] if the tag is not a [`SensorModel`].
    pub fn from_tag(tag: u8) -> Result<Sensor, SetupError> {
        Ok(Sensor::new(SensorModel::try_from(tag)?))
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    /// Reads relative humidity (%) and temperature (°C) from the sensor.
    ///
    /// Any error from the bus or the sensor's data is returned as-is. No retries are made.
    pub fn read<I2C, D>(&self, i2c: &mut I2C, delay: &mut D) -> Result<Reading, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        self.read_raw(i2c, delay).map(Reading::from)
    }
}

impl RawSensor for Sensor {
    fn read_raw<I2C, D>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
    ) -> Result<RawReading, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        match &self.driver {
            Driver::Dht12(driver) => driver.read_raw(i2c, delay),
            Driver::Am2320(driver) => driver.read_raw(i2c, delay),
        }
    }
}
