#![cfg_attr(not(test), no_std)]

/// Drivers for the AM2320 humidity and temperature sensor.
///
/// Refer to [this datasheet](https://cdn-shop.adafruit.com/product-files/3721/AM2320.pdf) for
/// more information about this device.
pub mod am2320;
/// Model selection, readings and errors shared by all Aosong sensors.
pub mod aosong;
/// Checksums used by Aosong sensors to protect their responses.
pub mod checksum;
/// Big- and little-endian 16-bit integer extraction.
pub mod codec;
/// Drivers for the DHT12 humidity and temperature sensor.
pub mod dht12;

pub use aosong::{
    model_name, Error, Options, RawReading, RawSensor, Reading, Response, Sensor, SensorModel,
    SetupError, DEFAULT_OPTIONS,
};
