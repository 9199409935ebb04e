use std::io::{Read, Write};

use super::err::Error;
use super::opt::{Options, Volume};
use super::read::{DoggedReader, VerboseReader};
use super::scan::{Decoder, Event};
use super::table::CodePointTable;

/// The tallies of one decoding run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// The number of code points resolved to a name.
    pub resolved: u64,
    /// The number of code points missing from the table.
    pub unknown: u64,
    /// The number of overlong sequences.
    pub overlong: u64,
    /// The number of invalid bytes.
    pub bad_bytes: u64,
    /// Whether the stream ended in the middle of a sequence.
    pub truncated: bool,
}

/// Decode the reader's bytes against the code point table.
///
/// This function drives a [`Decoder`] over the reader, resolves every
/// accepted code point through the table, and reports the results line by
/// line: resolved names on `output`, everything else on `diagnostics`.
/// The diagnostic lines are, with uppercase hexadecimal values and 0-based
/// byte offsets:
///
/// ```text
/// Invalid encoding: 0x<HEX> at <offset>
/// Unknown code: 0x<HEX> at <offset>
/// Invalid byte: 0x<HEX> at <offset>
/// Incomplete code at <offset>
/// ```
///
/// Decoding continues past invalid bytes, overlong encodings, and unknown
/// codes; a truncated stream reports one incomplete-code line and then
/// stops the run for good. At regular volume and above, a closing summary
/// line goes to `diagnostics` as well.
pub fn run<R, O, D>(
    options: &Options,
    table: &CodePointTable,
    reader: R,
    output: &mut O,
    diagnostics: &mut D,
) -> Result<Summary, Error>
where
    R: Read,
    O: Write,
    D: Write,
{
    let reader = DoggedReader::new(reader);
    let summary = if matches!(options.volume(), Volume::Detailed) {
        let decoder = Decoder::with_options(options, VerboseReader::new(reader));
        drive(decoder, table, output, diagnostics)?
    } else {
        let decoder = Decoder::with_options(options, reader);
        drive(decoder, table, output, diagnostics)?
    };

    if options.verbose() {
        writeln!(
            diagnostics,
            "{} resolved, {} unknown, {} invalid encodings, {} invalid bytes{}",
            summary.resolved,
            summary.unknown,
            summary.overlong,
            summary.bad_bytes,
            if summary.truncated {
                ", stream truncated"
            } else {
                ""
            }
        )
        .map_err(Error::unwritable)?;
    }

    Ok(summary)
}

/// Pump the decoder dry, reporting one line per event.
fn drive<R, O, D>(
    mut decoder: Decoder<R>,
    table: &CodePointTable,
    output: &mut O,
    diagnostics: &mut D,
) -> Result<Summary, Error>
where
    R: Read,
    O: Write,
    D: Write,
{
    let mut summary = Summary::default();

    loop {
        match decoder.read_event()? {
            Event::Code { value, start, .. } => match table.lookup(value) {
                Some(name) => {
                    summary.resolved += 1;
                    writeln!(output, "{}", name).map_err(Error::unwritable)?;
                }
                None => {
                    summary.unknown += 1;
                    writeln!(diagnostics, "Unknown code: 0x{:X} at {}", value, start)
                        .map_err(Error::unwritable)?;
                }
            },
            Event::Overlong { value, start } => {
                summary.overlong += 1;
                writeln!(diagnostics, "Invalid encoding: 0x{:X} at {}", value, start)
                    .map_err(Error::unwritable)?;
            }
            Event::BadByte { byte, at } => {
                summary.bad_bytes += 1;
                writeln!(diagnostics, "Invalid byte: 0x{:X} at {}", byte, at)
                    .map_err(Error::unwritable)?;
            }
            Event::Truncated { start } => {
                summary.truncated = true;
                writeln!(diagnostics, "Incomplete code at {}", start)
                    .map_err(Error::unwritable)?;
                break;
            }
            Event::End => break,
        }
    }

    Ok(summary)
}

// ================================================================================================
