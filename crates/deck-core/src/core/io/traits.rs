use crate::core::models::config::SimulationConfig;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Defines the interface for reading and writing simulation input decks.
///
/// Implementors own the format-specific parsing and serialization and carry
/// whatever reader settings the format needs (for example how strictly
/// unknown commands are treated).
pub trait DeckFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a deck from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    ///
    /// # Return
    ///
    /// Returns the parsed simulation configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(&self, reader: &mut impl BufRead) -> Result<SimulationConfig, Self::Error>;

    /// Writes a deck to a writer.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration to write.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        &self,
        config: &SimulationConfig,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a deck from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<SimulationConfig, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    /// Writes a deck to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        &self,
        config: &SimulationConfig,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(config, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn read_from_str(&self, text: &str) -> Result<SimulationConfig, Self::Error> {
        self.read_from(&mut Cursor::new(text.as_bytes()))
    }

    fn write_to_string(&self, config: &SimulationConfig) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        self.write_to(config, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
