/// Byte-oriented character sink fed by the formatter.
pub trait ByteSink {
    /// Consume one byte, returning how many bytes were taken.
    fn write_byte(&mut self, byte: u8) -> usize;

    /// Consume a buffer one byte at a time.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&b| self.write_byte(b)).sum()
    }
}

impl ByteSink for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> usize {
        self.push(byte);
        1
    }
}
