//! Display bus transport
//!
//! A display controller on a two-wire bus distinguishes command bytes from
//! display RAM bytes by a control byte sent ahead of the payload. The
//! [`DisplayTransport`] trait hides that framing so the driver only deals
//! in "send this opcode" and "send this run of pixel data".

use core::fmt;

use crate::i2c::I2cBus;

/// Maximum pixel-data payload per bus transaction, in bytes
pub const MAX_DATA_CHUNK: usize = 16;

/// Control byte marking the rest of the transaction as a command
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte marking the rest of the transaction as display RAM data
pub const CONTROL_DATA: u8 = 0x40;

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// Underlying bus error
    Bus(E),
    /// Data chunk exceeds the per-transaction maximum
    ChunkTooLong,
}

impl<E> From<E> for TransportError<E> {
    fn from(error: E) -> Self {
        TransportError::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransportError::Bus(e) => write!(f, "bus error: {:?}", e),
            TransportError::ChunkTooLong => {
                write!(f, "data chunk longer than {} bytes", MAX_DATA_CHUNK)
            }
        }
    }
}

/// Command/data transport to a display controller
///
/// Each call is one blocking bus transaction. Callers are responsible for
/// splitting data payloads into pieces no longer than
/// [`max_chunk_len`](DisplayTransport::max_chunk_len).
pub trait DisplayTransport {
    /// Error type for transport operations
    type Error;

    /// Send a single command (or command parameter) byte
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `opcode` - Command byte
    fn write_command(&mut self, address: u8, opcode: u8) -> Result<(), Self::Error>;

    /// Send one chunk of display RAM data
    ///
    /// # Arguments
    /// * `address` - 7-bit device address
    /// * `chunk` - Pixel data, at most `max_chunk_len()` bytes
    fn write_data(&mut self, address: u8, chunk: &[u8]) -> Result<(), Self::Error>;

    /// Largest data chunk accepted by [`write_data`](DisplayTransport::write_data)
    fn max_chunk_len(&self) -> usize {
        MAX_DATA_CHUNK
    }
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    type Error = T::Error;

    fn write_command(&mut self, address: u8, opcode: u8) -> Result<(), Self::Error> {
        (**self).write_command(address, opcode)
    }

    fn write_data(&mut self, address: u8, chunk: &[u8]) -> Result<(), Self::Error> {
        (**self).write_data(address, chunk)
    }

    fn max_chunk_len(&self) -> usize {
        (**self).max_chunk_len()
    }
}

/// [`DisplayTransport`] over an [`I2cBus`]
///
/// Commands go out as `[CONTROL_COMMAND, opcode]`, data chunks as
/// `[CONTROL_DATA, bytes...]`, each in its own write transaction.
pub struct I2cTransport<B> {
    bus: B,
}

impl<B> I2cTransport<B>
where
    B: I2cBus,
{
    /// Create a transport on top of an I2C bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Consume the transport and return the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B> DisplayTransport for I2cTransport<B>
where
    B: I2cBus,
{
    type Error = TransportError<B::Error>;

    fn write_command(&mut self, address: u8, opcode: u8) -> Result<(), Self::Error> {
        self.bus.write(address, &[CONTROL_COMMAND, opcode])?;
        Ok(())
    }

    fn write_data(&mut self, address: u8, chunk: &[u8]) -> Result<(), Self::Error> {
        if chunk.len() > MAX_DATA_CHUNK {
            return Err(TransportError::ChunkTooLong);
        }

        let mut frame = [0u8; MAX_DATA_CHUNK + 1];
        frame[0] = CONTROL_DATA;
        frame[1..=chunk.len()].copy_from_slice(chunk);
        self.bus.write(address, &frame[..=chunk.len()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i2c::I2cBusError;
    use heapless::Vec;

    /// Mock bus recording each transaction
    struct MockBus {
        writes: Vec<(u8, Vec<u8, 32>), 8>,
        fail: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl I2cBus for MockBus {
        type Error = I2cBusError;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(I2cBusError::Nack);
            }
            let mut bytes = Vec::new();
            bytes.extend_from_slice(data).unwrap();
            self.writes.push((address, bytes)).unwrap();
            Ok(())
        }
    }

    #[test]
    fn test_command_is_prefixed_with_control_byte() {
        let mut transport = I2cTransport::new(MockBus::new());
        transport.write_command(0x3C, 0xAE).unwrap();

        let bus = transport.release();
        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.writes[0].0, 0x3C);
        assert_eq!(bus.writes[0].1.as_slice(), &[0x00, 0xAE]);
    }

    #[test]
    fn test_data_is_prefixed_with_data_marker() {
        let mut transport = I2cTransport::new(MockBus::new());
        transport.write_data(0x3D, &[1, 2, 3]).unwrap();

        let bus = transport.release();
        assert_eq!(bus.writes[0].0, 0x3D);
        assert_eq!(bus.writes[0].1.as_slice(), &[0x40, 1, 2, 3]);
    }

    #[test]
    fn test_full_chunk_fits_one_transaction() {
        let mut transport = I2cTransport::new(MockBus::new());
        let chunk = [0xFFu8; MAX_DATA_CHUNK];
        transport.write_data(0x3C, &chunk).unwrap();

        let bus = transport.release();
        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.writes[0].1.len(), MAX_DATA_CHUNK + 1);
    }

    #[test]
    fn test_oversized_chunk_rejected() {
        let mut transport = I2cTransport::new(MockBus::new());
        let chunk = [0u8; MAX_DATA_CHUNK + 1];

        assert_eq!(
            transport.write_data(0x3C, &chunk),
            Err(TransportError::ChunkTooLong)
        );
        assert!(transport.release().writes.is_empty());
    }

    #[test]
    fn test_bus_error_propagates() {
        let mut bus = MockBus::new();
        bus.fail = true;
        let mut transport = I2cTransport::new(bus);

        assert_eq!(
            transport.write_command(0x3C, 0xAF),
            Err(TransportError::Bus(I2cBusError::Nack))
        );
    }

    #[test]
    fn test_default_chunk_len() {
        let transport = I2cTransport::new(MockBus::new());
        assert_eq!(transport.max_chunk_len(), 16);
    }

    fn power_on<T: DisplayTransport>(mut transport: T) -> Result<usize, T::Error> {
        transport.write_command(0x3C, 0xAF)?;
        Ok(transport.max_chunk_len())
    }

    #[test]
    fn test_borrowed_transport() {
        let mut transport = I2cTransport::new(MockBus::new());
        assert_eq!(power_on(&mut transport), Ok(MAX_DATA_CHUNK));
        assert_eq!(transport.release().writes.len(), 1);
    }
}
