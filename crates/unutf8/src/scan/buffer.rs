use std::io::Read;

use crate::opt::Options;

/// The decoder's byte buffer.
pub(super) struct Buffer {
    // Invariant: cursor <= filled <= data.len()
    data: Vec<u8>,
    cursor: usize,
    filled: usize,
}

impl Buffer {
    /// Create a new buffer with the given options.
    pub fn with_options(options: &Options) -> Self {
        Self {
            data: vec![0; options.read_buffer_size()],
            cursor: 0,
            filled: 0,
        }
    }

    /// Reset this buffer.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.filled = 0;
    }

    /// Determine whether any bytes are available for reading.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.cursor < self.filled
    }

    /// Peek at the next byte.
    ///
    /// This method returns `None` if there are no more bytes to read.
    pub fn peek(&self) -> Option<u8> {
        if self.cursor < self.filled {
            Some(self.data[self.cursor])
        } else {
            None
        }
    }

    /// Consume the next byte.
    ///
    /// # Panics
    ///
    /// If there are no more bytes to read. This method should be invoked only
    /// after an immediately preceding invocation of [`Buffer::peek`] that
    /// produced a byte.
    pub fn consume(&mut self) {
        assert!(self.cursor < self.filled);
        self.cursor += 1;
    }

    /// Fill the buffer and return the number of bytes read.
    ///
    /// # Panics
    ///
    /// If the number of bytes read is larger than the buffer's free space.
    pub fn fill(&mut self, reader: &mut impl Read) -> std::io::Result<usize> {
        let slice = &mut self.data[self.filled..];
        let count = reader.read(slice)?;
        assert!(count <= slice.len(), "read count is at most buffer size");
        self.filled += count;
        Ok(count)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("cursor", &self.cursor)
            .field("filled", &self.filled)
            .field("capacity", &self.data.capacity())
            .finish()
    }
}
