use std::fs::File;
use std::io::{BufRead, BufReader};

use super::err::{Error, ErrorKind};
use super::opt::Options;
use super::util::parse_hex;

/// The largest value a four-byte sequence can carry, i.e., 21 set bits.
pub const MAX_CODE: u32 = 0x1f_ffff;

// ================================================================================================

/// An entry of the code point table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePoint {
    code: u32,
    name: String,
}

impl CodePoint {
    /// Get the numeric code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Get the descriptive name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ================================================================================================

/// A directory of code point names.
///
/// The table is built once, before decoding starts, from a text file with
/// one entry per line. Thereafter it is never mutated: lookups return
/// references that stay valid for the table's lifetime, and sharing the
/// table read-only across threads requires no locking.
pub struct CodePointTable {
    /// The entries, sorted ascending by code.
    entries: Vec<CodePoint>,
}

impl CodePointTable {
    /// Load the table from the file named by the options.
    ///
    /// An unopenable or unreadable file yields an
    /// [`Unloadable`](ErrorKind::Unloadable) error with the I/O failure
    /// attached.
    pub fn load(options: &Options) -> Result<Self, Error> {
        let file = File::open(options.table_path()).map_err(Error::unloadable)?;
        Self::parse(options, BufReader::new(file))
    }

    /// Parse the table from the reader.
    ///
    /// Each line comprises a hexadecimal code, whitespace, and the rest of
    /// the line as the code point's name. The parse is lenient: lines that
    /// do not produce both fields are skipped, as are codes beyond
    /// [`MAX_CODE`], which no four-byte sequence can encode. Names longer
    /// than the configured cap are truncated. After reading, the entries
    /// are sorted ascending by code; should the same code appear more than
    /// once, the first entry wins.
    ///
    /// A table without a single entry is a load failure, not a valid table.
    pub fn parse(options: &Options, reader: impl BufRead) -> Result<Self, Error> {
        let mut entries = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(Error::unloadable)?;
            if let Some(entry) = parse_entry(&line, options.name_length()) {
                entries.push(entry);
            }
        }

        if entries.is_empty() {
            return Err(ErrorKind::EmptyTable.into());
        }

        entries.sort_by_key(|entry| entry.code);
        entries.dedup_by_key(|entry| entry.code);

        Ok(Self { entries })
    }

    /// Look up the name for the code.
    ///
    /// This method binary-searches the sorted entries over a half-open
    /// window, narrowing until the window collapses. It returns the exact
    /// match's name or `None`, never a spurious value.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        let (mut begin, mut end) = (0, self.entries.len());

        while begin < end {
            let mid = begin + (end - begin) / 2;
            let entry = &self.entries[mid];

            if entry.code == code {
                return Some(&entry.name);
            } else if entry.code < code {
                begin = mid + 1;
            } else {
                end = mid;
            }
        }

        None
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Determine whether the table has no entries.
    ///
    /// Since loading an empty table is an error, this method returns
    /// `false` for every table that can actually be constructed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CodePointTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodePointTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

// ------------------------------------------------------------------------------------------------

/// Parse one table line into an entry.
fn parse_entry(line: &str, name_length: usize) -> Option<CodePoint> {
    let (code, name) = line.trim().split_once(char::is_whitespace)?;

    let code = parse_hex(code.as_bytes())?;
    if MAX_CODE < code {
        return None;
    }

    let name = name.trim_start();
    if name.is_empty() {
        return None;
    }

    Some(CodePoint {
        code,
        name: truncated(name, name_length).to_string(),
    })
}

/// Truncate the name to at most `length` characters.
fn truncated(name: &str, length: usize) -> &str {
    match name.char_indices().nth(length) {
        Some((index, _)) => &name[..index],
        None => name,
    }
}

// ================================================================================================

#[cfg(test)]
mod test {
    use super::{CodePointTable, ErrorKind, Options};

    fn table(source: &str) -> CodePointTable {
        CodePointTable::parse(&Options::default(), source.as_bytes())
            .expect("test tables are well-formed")
    }

    #[test]
    fn test_parse_and_lookup() {
        let table = table(
            "0041 LATIN CAPITAL LETTER A\n\
             00E9 LATIN SMALL LETTER E WITH ACUTE\n\
             20AC EURO SIGN\n",
        );

        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup(0x41), Some("LATIN CAPITAL LETTER A"));
        assert_eq!(table.lookup(0xe9), Some("LATIN SMALL LETTER E WITH ACUTE"));
        assert_eq!(table.lookup(0x20ac), Some("EURO SIGN"));
        assert_eq!(table.lookup(0x42), None);
        assert_eq!(table.lookup(0), None);
        assert_eq!(table.lookup(u32::MAX), None);
    }

    #[test]
    fn test_insertion_order() {
        // Lookup is a function of the sorted contents, not insertion order.
        let shuffled = table("20AC EURO SIGN\n0041 LATIN CAPITAL LETTER A\n000A LINE FEED\n");
        let sorted = table("000A LINE FEED\n0041 LATIN CAPITAL LETTER A\n20AC EURO SIGN\n");

        for code in [0x0a, 0x41, 0x20ac, 0x0b, 0x42, 0x20ad] {
            assert_eq!(shuffled.lookup(code), sorted.lookup(code));
        }
    }

    #[test]
    fn test_lenient_parse() {
        let table = table(
            "not-a-code SOME NAME\n\
             0041\n\
             \n\
             1FFFFF LAST REACHABLE CODE\n\
             200000 BEYOND FOUR BYTES\n\
             0041 LATIN CAPITAL LETTER A\n\
             0041 SHADOWED DUPLICATE\n",
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(0x41), Some("LATIN CAPITAL LETTER A"));
        assert_eq!(table.lookup(0x1f_ffff), Some("LAST REACHABLE CODE"));
        assert_eq!(table.lookup(0x20_0000), None);
    }

    #[test]
    fn test_name_truncation() {
        let long = "X".repeat(200);
        let table = table(&format!("0041 {}\n", long));

        let name = table.lookup(0x41).expect("entry was just parsed");
        assert_eq!(name.chars().count(), 90);
    }

    #[test]
    fn test_empty_table() {
        let result = CodePointTable::parse(&Options::default(), &b""[..]);
        assert_eq!(
            result.expect_err("an empty table must not load").kind(),
            ErrorKind::EmptyTable
        );

        let result = CodePointTable::parse(&Options::default(), &b"junk\nmore junk\n"[..]);
        assert_eq!(
            result.expect_err("a table of junk must not load").kind(),
            ErrorKind::EmptyTable
        );
    }

    #[test]
    fn test_single_entry() {
        let table = table("0041 LATIN CAPITAL LETTER A\n");

        assert_eq!(table.lookup(0x40), None);
        assert_eq!(table.lookup(0x41), Some("LATIN CAPITAL LETTER A"));
        assert_eq!(table.lookup(0x42), None);
    }
}
