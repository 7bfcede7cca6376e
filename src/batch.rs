//! Command batching and wire-request encoding
//!
//! A control transfer to the adapter can carry up to four payload bytes
//! packed into its 16-bit `value` and `index` fields, so sending display
//! traffic byte-by-byte would waste most of each transfer. [`Batch`]
//! coalesces consecutive same-type bytes into runs of up to
//! [`MAX_BATCH`] and [`Frame`] encodes a closed run into the
//! request/value/index triple handed to the transport.
//!
//! Bytes only coalesce while they share a *tag*: the operation class and
//! controller target mask combined exactly as they appear in the request
//! byte (e.g. `DATA | Target::BOTH.bits()`). A byte with a different tag
//! closes the pending run first, so bytes never reorder across a type
//! boundary. The session layer in [`crate::display`] drives this state
//! machine and performs the actual transfers.
//!
//! ## Example
//!
//! ```
//! use lcd2usb::command::{self, Target};
//! use lcd2usb::Batch;
//!
//! let tag = command::DATA | Target::BOTH.bits();
//! let mut batch = Batch::new();
//!
//! // 'H' and 'I' coalesce; nothing goes on the wire yet.
//! assert_eq!(batch.push(tag, b'H'), None);
//! assert_eq!(batch.push(tag, b'I'), None);
//!
//! // Closing the run yields one frame carrying both bytes.
//! let frame = match batch.take() {
//!     Some(frame) => frame,
//!     None => return,
//! };
//! assert_eq!(frame.value, 0x4948);
//! assert_eq!(frame.index, 0);
//! ```

/// Maximum payload bytes per control transfer
///
/// Two bytes each in the `value` and `index` fields. This is a hard
/// protocol ceiling, not a tunable.
pub const MAX_BATCH: usize = 4;

/// Length bits mask of the request byte (payload length minus one)
const LENGTH_MASK: u8 = 0b11;

/// An encoded control transfer ready for the wire
///
/// Constructed when a batch run is closed, handed to the transport,
/// discarded. Never retained or replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Request byte: tag with the length bits filled in
    pub request: u8,
    /// Payload bytes 0 and 1, little-endian, zero-filled past the run
    pub value: u16,
    /// Payload bytes 2 and 3, little-endian, zero-filled past the run
    pub index: u16,
}

impl Frame {
    /// Encode a run of 1..=[`MAX_BATCH`] bytes under the given tag
    ///
    /// The low two bits of the request byte encode the payload length
    /// minus one; a tag must leave them clear.
    pub fn pack(tag: u8, bytes: &[u8]) -> Self {
        debug_assert!(!bytes.is_empty() && bytes.len() <= MAX_BATCH);
        debug_assert_eq!(tag & LENGTH_MASK, 0);

        Self {
            request: tag | (bytes.len() as u8 - 1),
            value: halfword(bytes, 0),
            index: halfword(bytes, 2),
        }
    }

    /// Payload length encoded in the request byte
    pub fn payload_len(&self) -> usize {
        usize::from(self.request & LENGTH_MASK) + 1
    }

    /// Decode the packed payload back into bytes
    ///
    /// Returns the full 4-byte packing; only the first
    /// [`payload_len`](Self::payload_len) bytes belong to the run.
    pub fn payload(&self) -> [u8; MAX_BATCH] {
        let value = self.value.to_le_bytes();
        let index = self.index.to_le_bytes();
        [value[0], value[1], index[0], index[1]]
    }
}

/// Pack two consecutive payload bytes into one 16-bit field
fn halfword(bytes: &[u8], at: usize) -> u16 {
    let low = bytes.get(at).copied().unwrap_or(0);
    let high = bytes.get(at + 1).copied().unwrap_or(0);
    u16::from(low) | (u16::from(high) << 8)
}

/// Accumulation buffer for same-type payload bytes
///
/// The buffer holds at most [`MAX_BATCH`] bytes, all sharing one tag.
/// It is plain state: [`push`](Self::push) and [`take`](Self::take)
/// return the [`Frame`]s that must go on the wire, in submission order,
/// and the caller performs the transfers. One `Batch` belongs to exactly
/// one session; the flush-on-type-change ordering is only correct under
/// serialized access.
#[derive(Debug, Default)]
pub struct Batch {
    /// Tag of the run in progress, `None` when the buffer is empty
    tag: Option<u8>,
    /// Pending payload bytes, submission order
    bytes: [u8; MAX_BATCH],
    /// Number of pending bytes
    len: usize,
}

impl Batch {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no bytes are pending
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
    }

    /// Append one byte under the given tag
    ///
    /// If a run with a different tag is pending it is closed and returned;
    /// the new byte then starts a fresh run. A run that reaches
    /// [`MAX_BATCH`] bytes is closed immediately. Either way, a returned
    /// frame carries only bytes submitted before any byte still buffered,
    /// so sending it right away preserves submission order on the wire.
    pub fn push(&mut self, tag: u8, byte: u8) -> Option<Frame> {
        let mut closed = None;
        if self.tag.is_some_and(|current| current != tag) {
            closed = self.take();
        }

        self.tag = Some(tag);
        self.bytes[self.len] = byte;
        self.len += 1;

        if self.len == MAX_BATCH {
            closed = self.take();
        }
        closed
    }

    /// Close the pending run, if any
    ///
    /// Returns `None` on an empty buffer (an explicit flush is then a
    /// no-op). The buffer is empty afterwards regardless of what the
    /// caller does with the frame.
    pub fn take(&mut self) -> Option<Frame> {
        let tag = self.tag.take()?;
        let frame = Frame::pack(tag, &self.bytes[..self.len]);
        self.len = 0;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{self, Target};

    const DATA_BOTH: u8 = command::DATA | Target::BOTH.bits();
    const CMD_BOTH: u8 = command::COMMAND | Target::BOTH.bits();

    #[test]
    fn test_full_batch_closes_on_fourth_byte() {
        let mut batch = Batch::new();
        assert_eq!(batch.push(DATA_BOTH, 0x11), None);
        assert_eq!(batch.push(DATA_BOTH, 0x22), None);
        assert_eq!(batch.push(DATA_BOTH, 0x33), None);

        let frame = batch.push(DATA_BOTH, 0x44).unwrap();
        assert_eq!(frame.request, DATA_BOTH | 3);
        assert_eq!(frame.value, 0x2211);
        assert_eq!(frame.index, 0x4433);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_type_change_closes_pending_run_first() {
        let mut batch = Batch::new();
        assert_eq!(batch.push(DATA_BOTH, b'a'), None);
        assert_eq!(batch.push(DATA_BOTH, b'b'), None);

        // The pending data run comes back; the command byte stays buffered.
        let frame = batch.push(CMD_BOTH, 0x01).unwrap();
        assert_eq!(frame.request, DATA_BOTH | 1);
        assert_eq!(frame.value, u16::from_le_bytes([b'a', b'b']));
        assert_eq!(frame.index, 0);

        let frame = batch.take().unwrap();
        assert_eq!(frame.request, CMD_BOTH);
        assert_eq!(frame.value, 0x0001);
    }

    #[test]
    fn test_target_change_is_a_type_change() {
        let ctrl0 = command::DATA | Target::CONTROLLER_0.bits();
        let mut batch = Batch::new();
        assert_eq!(batch.push(DATA_BOTH, 0x55), None);

        let frame = batch.push(ctrl0, 0x66).unwrap();
        assert_eq!(frame.request, DATA_BOTH);
        assert_eq!(frame.value, 0x0055);
    }

    #[test]
    fn test_take_on_empty_buffer_is_a_no_op() {
        let mut batch = Batch::new();
        assert_eq!(batch.take(), None);
        assert_eq!(batch.take(), None);
    }

    #[test]
    fn test_buffer_reusable_after_take() {
        let mut batch = Batch::new();
        assert_eq!(batch.push(CMD_BOTH, 0x80), None);
        assert!(batch.take().is_some());
        assert!(batch.is_empty());

        assert_eq!(batch.push(DATA_BOTH, 0x20), None);
        let frame = batch.take().unwrap();
        assert_eq!(frame.request, DATA_BOTH);
        assert_eq!(frame.value, 0x0020);
    }

    #[test]
    fn test_packing_round_trip_for_every_run_length() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        for len in 1..=MAX_BATCH {
            let frame = Frame::pack(DATA_BOTH, &bytes[..len]);
            assert_eq!(frame.payload_len(), len);
            assert_eq!(&frame.payload()[..len], &bytes[..len]);
            // Slots past the run are zero-filled.
            assert!(frame.payload()[len..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_single_byte_frame_packs_into_value_low() {
        let frame = Frame::pack(CMD_BOTH, &[0x01]);
        assert_eq!(frame.request, CMD_BOTH);
        assert_eq!(frame.value, 0x0001);
        assert_eq!(frame.index, 0);
    }
}
