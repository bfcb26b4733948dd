use embedded_hal::i2c::{Error, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct I2cError(pub ErrorKind);

impl Error for I2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

pub const NACK: I2cError = I2cError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));

pub enum FakeRead {
    Success(Vec<u8>),
    Error(),
}

pub enum FakeWrite {
    Success(),
    Nack(),
}

/// A scripted I2C bus. Reads and writes are answered in order from the given scripts, and every
/// accepted write is recorded along with the address it was sent to.
pub struct I2C {
    reads: Vec<FakeRead>,
    writes: Vec<FakeWrite>,
    written_data: Vec<(u8, Vec<u8>)>,
    read_addresses: Vec<u8>,
}

impl I2C {
    pub fn new(reads: Vec<FakeRead>, writes: Vec<FakeWrite>) -> I2C {
        I2C {
            written_data: Vec::with_capacity(writes.len()),
            read_addresses: Vec::with_capacity(reads.len()),
            reads: reads,
            writes: writes,
        }
    }

    pub fn get_written_data(&self) -> &[(u8, Vec<u8>)] {
        self.written_data.as_slice()
    }

    pub fn get_read_addresses(&self) -> &[u8] {
        self.read_addresses.as_slice()
    }

    pub fn is_done(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty()
    }

    fn fake_read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), I2cError> {
        if self.reads.is_empty() {
            panic!("Unexpected read from address {:#04x}.", address);
        }
        self.read_addresses.push(address);
        match self.reads.remove(0) {
            FakeRead::Success(data) => {
                if data.len() != buffer.len() {
                    panic!(
                        "Read {} bytes, but {} were provided.",
                        buffer.len(),
                        data.len()
                    );
                }
                buffer.copy_from_slice(&data);
                Ok(())
            }
            FakeRead::Error() => Err(I2cError(ErrorKind::Bus)),
        }
    }

    fn fake_write(&mut self, address: u8, bytes: &[u8]) -> Result<(), I2cError> {
        if self.writes.is_empty() {
            panic!("Unexpected write to address {:#04x}.", address);
        }
        match self.writes.remove(0) {
            FakeWrite::Success() => {
                self.written_data.push((address, bytes.to_vec()));
                Ok(())
            }
            FakeWrite::Nack() => Err(NACK),
        }
    }
}

impl ErrorType for I2C {
    type Error = I2cError;
}

impl I2c for I2C {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            match operation {
                Operation::Read(buffer) => self.fake_read(address, buffer)?,
                Operation::Write(bytes) => self.fake_write(address, bytes)?,
            }
        }
        Ok(())
    }
}
