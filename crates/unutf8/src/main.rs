use std::fs::File;
use std::process::ExitCode;

use unutf8::err::{report, ErrorKind};
use unutf8::opt::{Options, Volume};
use unutf8::{run, CodePointTable};

/// The usage message.
const USAGE: &str = "usage: un-utf8 <input-file>";

fn main() -> ExitCode {
    let mut volume = Volume::Silent;
    let mut files = Vec::new();

    for argument in std::env::args().skip(1) {
        match argument.as_str() {
            "-v" | "--verbose" => volume = Volume::Regular,
            "-vv" | "--detailed" => volume = Volume::Detailed,
            _ => files.push(argument),
        }
    }

    let [file] = files.as_slice() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let options = Options::builder().volume(volume).build();

    // Check the input file before loading the table.
    let input = match File::open(file) {
        Ok(input) => input,
        Err(_) => {
            eprintln!("Can't open file: {}", file);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    let table = match CodePointTable::load(&options) {
        Ok(table) => table,
        Err(error) if matches!(error.kind(), ErrorKind::Unloadable) => {
            eprintln!("Can't open file: {}", options.table_path().display());
            return ExitCode::FAILURE;
        }
        Err(error) => {
            report(&error);
            return ExitCode::FAILURE;
        }
    };

    let result = {
        let (stdout, stderr) = (std::io::stdout(), std::io::stderr());
        run(&options, &table, input, &mut stdout.lock(), &mut stderr.lock())
    };

    // Diagnostics along the way, including a truncated stream, are not
    // failures; only losing the input or an output sink is.
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}
