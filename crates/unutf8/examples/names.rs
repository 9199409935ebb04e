/// # names: Decoding a Stream Against a Tiny Table
///
/// This example builds a small code point table in memory and decodes a
/// byte string that exercises every kind of report: resolved names,
/// an unknown code, an invalid byte, and an overlong encoding. Resolved
/// names go to standard output, everything else to standard error.
use std::process::ExitCode;

use unutf8::err::report;
use unutf8::opt::Options;
use unutf8::{run, CodePointTable};

const TABLE: &[u8] = b"0041 LATIN CAPITAL LETTER A\n\
    0068 LATIN SMALL LETTER H\n\
    0061 LATIN SMALL LETTER A\n\
    0021 EXCLAMATION MARK\n\
    00E9 LATIN SMALL LETTER E WITH ACUTE\n\
    1F602 FACE WITH TEARS OF JOY\n";

const INPUT: &[u8] = b"Aha!\xc3\xa9\xf0\x9f\x98\x82\xe2\x82\xac\xbf\xc0\x80";

fn decode() -> std::io::Result<()> {
    let options = Options::with_log();
    let table = CodePointTable::parse(&options, TABLE)?;

    let (stdout, stderr) = (std::io::stdout(), std::io::stderr());
    run(
        &options,
        &table,
        INPUT,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    Ok(())
}

fn main() -> ExitCode {
    if let Err(error) = decode() {
        report(&error);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
