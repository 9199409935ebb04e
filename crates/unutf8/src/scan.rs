mod buffer;
mod classify;

use self::buffer::Buffer;
use self::classify::{classify, is_continuation, Class};

use super::err::Error;
use super::opt::Options;

// ================================================================================================

/// The outcome of decoding one sequence.
///
/// Each variant carries the byte offsets needed for diagnostics. Offsets
/// are 0-based counts from the start of the stream; `start` always names
/// the offset of the sequence's lead byte, while `at` names the offset of
/// the offending byte itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A structurally valid code point with its start offset and encoded
    /// length in bytes.
    Code {
        value: u32,
        start: usize,
        length: usize,
    },
    /// A well-formed sequence whose value would have fit into a shorter
    /// encoding.
    Overlong { value: u32, start: usize },
    /// A byte that is neither a valid lead nor an expected continuation.
    BadByte { byte: u8, at: usize },
    /// The stream ended in the middle of a multi-byte sequence.
    Truncated { start: usize },
    /// The stream ended at a sequence boundary.
    End,
}

// ================================================================================================

/// A decoder for UTF-8 byte sequences.
///
/// The decoder consumes its reader one byte at a time and reports one
/// [`Event`] per decode attempt. It classifies the lead byte's encoding
/// length, consumes the required continuation bytes, reconstructs the code
/// point value, and checks the result for overlong encoding. The value is
/// reconstructed as a plain `u32`; surrogates and values beyond the Unicode
/// range decode structurally and are left for the code point table to
/// reject.
///
/// The running byte position advances by exactly one for every byte
/// consumed, including bytes consumed only to discover their invalidity,
/// and never rewinds. After [`Event::BadByte`] the offending byte stays
/// consumed and the next attempt classifies the byte that follows it. After
/// [`Event::Truncated`] or [`Event::End`] every further attempt reports
/// [`Event::End`].
pub struct Decoder<R> {
    /// The underlying reader.
    reader: R,
    /// The byte data being decoded.
    buffer: Buffer,
    /// The number of bytes consumed from the reader so far.
    position: usize,
}

impl<R: std::io::Read> Decoder<R> {
    /// Create a new decoder with the default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(&Options::default(), reader)
    }

    /// Create a new decoder with the given options.
    pub fn with_options(options: &Options, reader: R) -> Self {
        Self {
            reader,
            buffer: Buffer::with_options(options),
            position: 0,
        }
    }

    /// Get the number of bytes consumed so far.
    ///
    /// The position also is the offset of the next unconsumed byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Consume the next byte, advancing the position.
    ///
    /// This method returns `None` at the end of the stream. Errors of the
    /// underlying reader do not consume anything.
    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        if !self.buffer.is_readable() {
            self.buffer.reset();
            let count = self.buffer.fill(&mut self.reader).map_err(Error::unreadable)?;
            if count == 0 {
                return Ok(None);
            }
        }

        let byte = self.buffer.peek().expect("buffer was just filled");
        self.buffer.consume();
        self.position += 1;
        Ok(Some(byte))
    }

    /// Decode the next sequence.
    ///
    /// This method reads one lead byte and, for multi-byte classes, the
    /// required continuation bytes, validating incrementally. It reports
    /// the outcome as an [`Event`]; only failures of the underlying reader
    /// surface as errors.
    pub fn read_event(&mut self) -> Result<Event, Error> {
        let start = self.position;
        let Some(lead) = self.next_byte()? else {
            return Ok(Event::End);
        };

        let class = classify(lead);
        if matches!(class, Class::Bad) {
            return Ok(Event::BadByte {
                byte: lead,
                at: start,
            });
        }

        let mut value = (lead & class.payload_mask()) as u32;
        let length = 1 + class.continuations();

        for _ in 0..class.continuations() {
            let at = self.position;
            let Some(byte) = self.next_byte()? else {
                return Ok(Event::Truncated { start });
            };
            if !is_continuation(byte) {
                return Ok(Event::BadByte { byte, at });
            }
            value = (value << 6) | (byte & 0x3f) as u32;
        }

        if value < class.min_value() {
            return Ok(Event::Overlong { value, start });
        }

        Ok(Event::Code {
            value,
            start,
            length,
        })
    }
}

impl<R> std::fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("buffer", &self.buffer)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

// ================================================================================================

#[cfg(test)]
mod test {
    use super::{Decoder, Event};
    use crate::opt::Options;

    fn events(bytes: &[u8]) -> Vec<Event> {
        let mut decoder = Decoder::new(bytes);
        let mut events = Vec::new();

        loop {
            let event = decoder.read_event().expect("byte slices do not fail");
            if matches!(event, Event::End) {
                break;
            }
            let halted = matches!(event, Event::Truncated { .. });
            events.push(event);
            if halted {
                break;
            }
        }

        events
    }

    #[test]
    fn test_ascii() {
        assert_eq!(
            events(b"Ok"),
            vec![
                Event::Code {
                    value: 0x4f,
                    start: 0,
                    length: 1
                },
                Event::Code {
                    value: 0x6b,
                    start: 1,
                    length: 1
                },
            ]
        );
    }

    #[test]
    fn test_multibyte() {
        // "é" (2 bytes), "€" (3 bytes), "𝄞" (4 bytes)
        assert_eq!(
            events(b"\xc3\xa9\xe2\x82\xac\xf0\x9d\x84\x9e"),
            vec![
                Event::Code {
                    value: 0xe9,
                    start: 0,
                    length: 2
                },
                Event::Code {
                    value: 0x20ac,
                    start: 2,
                    length: 3
                },
                Event::Code {
                    value: 0x1d11e,
                    start: 5,
                    length: 4
                },
            ]
        );
    }

    #[test]
    fn test_overlong() {
        assert_eq!(
            events(b"\xc0\x80"),
            vec![Event::Overlong { value: 0, start: 0 }]
        );
        assert_eq!(
            events(b"\xc1\xbf"),
            vec![Event::Overlong {
                value: 0x7f,
                start: 0
            }]
        );
        assert_eq!(
            events(b"\xe0\x9f\xbf"),
            vec![Event::Overlong {
                value: 0x7ff,
                start: 0
            }]
        );
        assert_eq!(
            events(b"\xf0\x8f\xbf\xbf"),
            vec![Event::Overlong {
                value: 0xffff,
                start: 0
            }]
        );
    }

    #[test]
    fn test_shortest_encodings() {
        // The smallest value of each length class is not overlong.
        assert_eq!(
            events(b"\xc2\x80"),
            vec![Event::Code {
                value: 0x80,
                start: 0,
                length: 2
            }]
        );
        assert_eq!(
            events(b"\xe0\xa0\x80"),
            vec![Event::Code {
                value: 0x800,
                start: 0,
                length: 3
            }]
        );
        assert_eq!(
            events(b"\xf0\x90\x80\x80"),
            vec![Event::Code {
                value: 0x1_0000,
                start: 0,
                length: 4
            }]
        );
    }

    #[test]
    fn test_structural_values() {
        // Surrogates and values beyond the Unicode range decode
        // structurally; rejecting them is the table's job.
        assert_eq!(
            events(b"\xed\xa0\x80"),
            vec![Event::Code {
                value: 0xd800,
                start: 0,
                length: 3
            }]
        );
        assert_eq!(
            events(b"\xf7\xbf\xbf\xbf"),
            vec![Event::Code {
                value: 0x1f_ffff,
                start: 0,
                length: 4
            }]
        );
    }

    #[test]
    fn test_bad_bytes() {
        // A stray continuation byte where a lead is expected.
        assert_eq!(
            events(b"\x80A"),
            vec![
                Event::BadByte { byte: 0x80, at: 0 },
                Event::Code {
                    value: 0x41,
                    start: 1,
                    length: 1
                },
            ]
        );

        // A reserved bit pattern.
        assert_eq!(
            events(b"\xffA"),
            vec![
                Event::BadByte { byte: 0xff, at: 0 },
                Event::Code {
                    value: 0x41,
                    start: 1,
                    length: 1
                },
            ]
        );

        // A continuation byte that lacks the continuation marker. The bad
        // byte stays consumed and decoding resumes right after it.
        assert_eq!(
            events(b"\xe2\x82A"),
            vec![Event::BadByte { byte: 0x41, at: 2 }]
        );
        assert_eq!(
            events(b"\xe2\x82AB"),
            vec![
                Event::BadByte { byte: 0x41, at: 2 },
                Event::Code {
                    value: 0x42,
                    start: 3,
                    length: 1
                },
            ]
        );
    }

    #[test]
    fn test_truncation() {
        assert_eq!(events(b"\xc3"), vec![Event::Truncated { start: 0 }]);
        assert_eq!(events(b"\xe2\x82"), vec![Event::Truncated { start: 0 }]);
        assert_eq!(
            events(b"A\xf0\x9d\x84"),
            vec![
                Event::Code {
                    value: 0x41,
                    start: 0,
                    length: 1
                },
                Event::Truncated { start: 1 },
            ]
        );
    }

    #[test]
    fn test_small_buffer() {
        // A sequence spanning several buffer refills decodes all the same.
        let options = Options::builder().read_buffer_size(2).build();
        let mut decoder = Decoder::with_options(&options, &b"\xf0\x9d\x84\x9e\xc3\xa9"[..]);

        assert_eq!(
            decoder.read_event().expect("slice reads do not fail"),
            Event::Code {
                value: 0x1d11e,
                start: 0,
                length: 4
            }
        );
        assert_eq!(
            decoder.read_event().expect("slice reads do not fail"),
            Event::Code {
                value: 0xe9,
                start: 4,
                length: 2
            }
        );
        assert_eq!(
            decoder.read_event().expect("slice reads do not fail"),
            Event::End
        );
        assert_eq!(decoder.position(), 6);
    }

    #[test]
    fn test_random_streams() {
        use rand::Rng;

        let mut rng = rand::rng();

        for _ in 0..64 {
            let length = rng.random_range(0..512);
            let bytes: Vec<u8> = (0..length).map(|_| rng.random::<u8>()).collect();

            let mut decoder = Decoder::new(bytes.as_slice());
            let mut previous = 0;

            loop {
                let event = decoder.read_event().expect("byte slices do not fail");
                assert!(previous <= decoder.position());
                previous = decoder.position();

                match event {
                    Event::Code { start, length, .. } => {
                        assert_eq!(start + length, decoder.position());
                    }
                    Event::Truncated { start } => {
                        assert!(start < decoder.position());
                        break;
                    }
                    Event::End => break,
                    _ => {}
                }
            }

            assert!(decoder.position() <= bytes.len());
        }
    }
}
