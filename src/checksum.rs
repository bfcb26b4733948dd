use crc::{Crc, CRC_16_MODBUS};

const AM2320_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Calculates the CRC of an AM2320 frame.
///
/// This is CRC-16/MODBUS: reflected, polynomial 0xA001 and seeded with 0xFFFF, as given in the
/// AM2320 datasheet. The sensor transmits it little-endian after the data bytes.
#[inline]
pub fn am2320_crc16(buf: &[u8]) -> u16 {
    AM2320_CRC.checksum(buf)
}

/// Bit-serial CRC-8 used by older DHT12 sample code.
///
/// Bits are consumed least-significant first. This is the Dallas/Maxim CRC-8 when seeded with 0.
/// DHT12 reads do not check it; see [`dht12_parity`] for the checksum the sensor transmits.
pub fn dht12_crc8(mut seed: u8, buf: &[u8]) -> u8 {
    for &byte in buf.iter() {
        let mut b = byte;
        for _ in 0..8 {
            if (seed ^ b) & 0x01 != 0 {
                seed = ((seed ^ 0x18) >> 1) | 0x80;
            } else {
                seed >>= 1;
            }
            b >>= 1;
        }
    }
    seed
}

/// The parity byte a DHT12 sends after its data: the low 8 bits of the sum of the data bytes.
pub fn dht12_parity(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}
