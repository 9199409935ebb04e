use std::io::{ErrorKind, Read};

use crate::util::nicely_str;

/// A reader that tolerates interruptions.
pub(crate) struct DoggedReader<R> {
    inner: R,
}

impl<R> DoggedReader<R> {
    /// Create a new dogged reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Read for DoggedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// A reader that prints helpful information for debugging.
///
/// Every read is traced on standard error with the running byte count and
/// the bytes just read. Trace lines are distinct from the decoding report,
/// which never goes through this reader.
#[derive(Debug)]
pub(crate) struct VerboseReader<R> {
    inner: R,
    total: usize,
}

impl<R> VerboseReader<R> {
    /// Create a new verbose reader.
    pub fn new(inner: R) -> Self {
        Self { inner, total: 0 }
    }
}

impl<R: Read> Read for VerboseReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.inner.read(buf) {
            Ok(0) => {
                eprintln!("read:  0 bytes at {}, end of stream", self.total);
                Ok(0)
            }
            Ok(n) => {
                eprintln!(
                    "read: {:2} bytes at {}, {}",
                    n,
                    self.total,
                    nicely_str(&buf[..n])
                );
                self.total += n;
                Ok(n)
            }
            Err(e) => {
                eprintln!("read: {:?} at {}", &e, self.total);
                Err(e)
            }
        }
    }
}
