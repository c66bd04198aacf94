use crate::{reader::Reader, BridgeError};

/// In-memory `(offset, length)` record describing a UTF-8 string.
///
/// Both fields are little-endian `u32`s laid out back to back, which is what
/// a `#[repr(C)]` `(*const u8, u32)` pair looks like on `wasm32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringDescriptor {
    pub offset: u32,
    pub length: u32,
}

impl StringDescriptor {
    pub const SIZE: usize = 8;

    pub fn read(mem: &[u8], index: u32) -> Result<Self, BridgeError> {
        let mut reader = Reader::new(mem, index as usize);
        let mut fields = Reader::new(reader.read(Self::SIZE)?, 0);
        Ok(Self {
            offset: fields.read_u32()?,
            length: fields.read_u32()?,
        })
    }

    pub fn bytes<'a>(&self, mem: &'a [u8]) -> Result<&'a [u8], BridgeError> {
        Reader::new(mem, self.offset as usize).read(self.length as usize)
    }
}

/// Decodes the string described by the descriptor stored at `index`.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD. Any descriptor or byte
/// range reaching past the end of `mem` fails with
/// [`BridgeError::OutOfBounds`].
pub fn decode_string(mem: &[u8], index: u32) -> Result<String, BridgeError> {
    let descriptor = StringDescriptor::read(mem, index)?;
    let bytes = descriptor.bytes(mem)?;
    tracing::trace!(index, ?descriptor, "decoded string descriptor");
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
