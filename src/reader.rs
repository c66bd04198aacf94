use crate::BridgeError;

#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8], position: usize) -> Self {
        Reader { data, position }
    }

    pub fn read(&mut self, n: usize) -> Result<&'a [u8], BridgeError> {
        let v = self
            .position
            .checked_add(n)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or(BridgeError::OutOfBounds {
                offset: self.position as u64,
                length: n as u64,
                mem_size: self.data.len(),
            })?;
        self.position += n;
        Ok(v)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BridgeError> {
        buf.copy_from_slice(self.read(buf.len())?);
        Ok(())
    }

    pub fn read_u32(&mut self) -> Result<u32, BridgeError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }
}
