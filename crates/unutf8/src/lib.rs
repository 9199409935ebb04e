//! # un-utf8
//!
//! This crate provides **byte-accurate decoding diagnostics for UTF-8
//! streams**. It reads a raw byte stream believed to be UTF-8 text,
//! validates every multi-byte sequence against the encoding rules, and
//! resolves each accepted code point to a human-readable name through a
//! preloaded code point table.
//!
//! Using the crate takes three steps:
//!
//!   * Build [`Options`](opt::Options), or stick with the defaults.
//!   * Load a [`CodePointTable`].
//!   * [`run`] the decoder over any [`Read`](std::io::Read), collecting
//!     resolved names and diagnostics on two separate sinks.
//!
//! Applications that want the decode events themselves, rather than the
//! formatted report, drive a [`Decoder`] directly and match on the
//! [`Event`]s it produces. The decoder consumes its input strictly
//! forward, one byte at a time, and annotates every event with 0-based
//! byte offsets. Invalid bytes and overlong encodings are reported and
//! skipped; only a stream that ends in the middle of a sequence stops a
//! run early.
//!
//!
//! # Example
//!
//! ```
//! # use unutf8::opt::Options;
//! # use unutf8::{run, CodePointTable};
//! let options = Options::default();
//! let table = CodePointTable::parse(
//!     &options,
//!     &b"0041 LATIN CAPITAL LETTER A\n00E9 LATIN SMALL LETTER E WITH ACUTE\n"[..],
//! )?;
//!
//! let (mut output, mut diagnostics) = (Vec::new(), Vec::new());
//! let summary = run(&options, &table, &b"A\xc3\xa9"[..], &mut output, &mut diagnostics)?;
//!
//! assert_eq!(
//!     output,
//!     b"LATIN CAPITAL LETTER A\nLATIN SMALL LETTER E WITH ACUTE\n"
//! );
//! assert!(diagnostics.is_empty());
//! assert_eq!(summary.resolved, 2);
//! # Ok::<(), unutf8::err::Error>(())
//! ```

pub mod err;
pub mod opt;
mod read;
mod run;
mod scan;
mod table;
pub mod util;

pub use run::{run, Summary};
pub use scan::{Decoder, Event};
pub use table::{CodePoint, CodePointTable, MAX_CODE};
