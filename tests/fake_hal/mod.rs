pub mod delay;
pub mod i2c;
