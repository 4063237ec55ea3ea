//! Property tests for control-byte framing over an I2C bus.

use monodot_hal::{
    DisplayTransport, I2cBus, I2cTransport, TransportError, CONTROL_COMMAND, CONTROL_DATA,
    MAX_DATA_CHUNK,
};
use proptest::prelude::*;

#[derive(Default)]
struct RecordingBus {
    writes: Vec<(u8, Vec<u8>)>,
}

impl I2cBus for RecordingBus {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        self.writes.push((address, data.to_vec()));
        Ok(())
    }
}

proptest! {
    #[test]
    fn command_is_one_framed_write(address in 0u8..0x80, opcode in any::<u8>()) {
        let mut transport = I2cTransport::new(RecordingBus::default());
        transport.write_command(address, opcode).unwrap();

        let bus = transport.release();
        prop_assert_eq!(bus.writes, vec![(address, vec![CONTROL_COMMAND, opcode])]);
    }

    #[test]
    fn data_chunk_is_one_framed_write(
        address in 0u8..0x80,
        chunk in prop::collection::vec(any::<u8>(), 0..=MAX_DATA_CHUNK),
    ) {
        let mut transport = I2cTransport::new(RecordingBus::default());
        transport.write_data(address, &chunk).unwrap();

        let mut expected = vec![CONTROL_DATA];
        expected.extend_from_slice(&chunk);
        let bus = transport.release();
        prop_assert_eq!(bus.writes, vec![(address, expected)]);
    }

    #[test]
    fn oversized_chunk_never_reaches_bus(
        chunk in prop::collection::vec(any::<u8>(), MAX_DATA_CHUNK + 1..64),
    ) {
        let mut transport = I2cTransport::new(RecordingBus::default());
        prop_assert_eq!(
            transport.write_data(0x3C, &chunk),
            Err(TransportError::ChunkTooLong)
        );
        prop_assert!(transport.release().writes.is_empty());
    }
}
