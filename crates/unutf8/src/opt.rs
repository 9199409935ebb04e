//! Helper module with the options for decoding runs.
//!
//! This module provides the options for loading the code point table and
//! decoding a byte stream, as well as the corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use unutf8::opt::Options;
//! let options = Options::builder()
//!     .name_length(40)
//!     .build();
//!
//! assert_eq!(options.name_length(), 40);
//! ```

use std::path::{Path, PathBuf};

/// The diagnostic logging volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Volume {
    Silent,
    Regular,
    Detailed,
}

#[derive(Clone, Debug)]
struct OptionData {
    volume: Volume,
    table_path: PathBuf,
    name_length: usize,
    read_buffer_size: usize,
}

impl OptionData {
    pub fn new() -> Self {
        Self {
            volume: Volume::Silent,
            table_path: PathBuf::from("unicode.txt"),
            name_length: 90,
            read_buffer_size: 1_024,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct OptionBuilder(OptionData);

impl OptionBuilder {
    /// Set the volume.
    pub fn volume(&mut self, volume: Volume) -> &mut Self {
        self.0.volume = volume;
        self
    }

    /// Set the path of the code point table.
    pub fn table_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.0.table_path = path.into();
        self
    }

    /// Set the maximum length of a code point name in characters.
    ///
    /// Longer names are truncated upon table load.
    pub fn name_length(&mut self, length: usize) -> &mut Self {
        self.0.name_length = length;
        self
    }

    /// Set the read buffer size.
    ///
    /// This method ensures that the size is at least one byte, since the
    /// decoder consumes its input through the buffer one byte at a time.
    pub fn read_buffer_size(&mut self, size: usize) -> &mut Self {
        self.0.read_buffer_size = size.max(1);
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> Options {
        Options(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct Options(OptionData);

impl Default for Options {
    fn default() -> Self {
        Options(OptionData::new())
    }
}

impl Options {
    /// Create a new builder with the default option values.
    pub fn builder() -> OptionBuilder {
        OptionBuilder(OptionData::new())
    }

    /// Instantiate the default options but with regular diagnostic output
    /// enabled.
    pub fn with_log() -> Options {
        Self::builder().volume(Volume::Regular).build()
    }

    /// Instantiate the default options but with detailed diagnostic output
    /// enabled.
    pub fn with_detailed_log() -> Options {
        Self::builder().volume(Volume::Detailed).build()
    }

    /// Get the volume.
    pub fn volume(&self) -> Volume {
        self.0.volume
    }

    /// Determine whether the volume is above silent.
    pub fn verbose(&self) -> bool {
        !matches!(self.0.volume, Volume::Silent)
    }

    /// Get the path of the code point table.
    pub fn table_path(&self) -> &Path {
        &self.0.table_path
    }

    /// Get the maximum length of a code point name in characters.
    pub fn name_length(&self) -> usize {
        self.0.name_length
    }

    /// Get the size of the read buffer.
    pub fn read_buffer_size(&self) -> usize {
        self.0.read_buffer_size
    }
}
