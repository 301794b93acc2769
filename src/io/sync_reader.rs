//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over purchases read from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to deserialize lines sequentially and a
//! `PurchaseGrouper` to collect consecutive lines of the same purchase. Only
//! the purchase currently being collected is held in memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<PurchaseRecord, InputError>` for each purchase:
//!
//! ```no_run
//! use rust_ticket_service::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("purchases.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(purchase) => println!("Processing purchase: {:?}", purchase),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - A line that cannot be deserialized is yielded as an Err and skipped
//! - A purchase with a bad line is yielded as a single Err

use crate::io::csv_format::{convert_purchase, CsvRecord, PurchaseGrouper};
use crate::types::{InputError, PurchaseRecord};
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV purchase reader
pub struct SyncReader {
    records: DeserializeRecordsIntoIter<File, CsvRecord>,
    grouper: PurchaseGrouper,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (type and tickets may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist and
    /// `InputError::IoError` if it cannot be opened for any other reason.
    pub fn new(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => InputError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => InputError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            records: reader.into_deserialize(),
            grouper: PurchaseGrouper::new(),
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<PurchaseRecord, InputError>;

    /// Get the next purchase from the CSV file
    ///
    /// Reads lines until one with a different purchase id closes the current
    /// purchase, or until end of file.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(PurchaseRecord))` - Successfully assembled purchase
    /// * `Some(Err(InputError))` - Malformed line or rejected purchase
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.records.next() {
                Some(Ok(record)) => {
                    if let Some(purchase) = self.grouper.push(record) {
                        return Some(convert_purchase(purchase));
                    }
                }
                Some(Err(e)) => return Some(Err(InputError::from(e))),
                None => return self.grouper.finish().map(convert_purchase),
            }
        }
    }
}
