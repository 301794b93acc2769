//! Asynchronous CSV reader with batch interface
//!
//! Provides batches of whole purchases read from a CSV file for the async
//! processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - a `PurchaseGrouper` that survives across batches, so a purchase whose
//!   lines straddle a batch boundary is carried over rather than split
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of PurchaseRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, PurchaseGrouper, convert_purchase)
//! ```

use crate::io::csv_format::{convert_purchase, CsvRecord, PendingPurchase, PurchaseGrouper};
use crate::types::{InputError, PurchaseRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV purchase reader
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    grouper: PurchaseGrouper,
    finished: bool,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            grouper: PurchaseGrouper::new(),
            finished: false,
        }
    }

    /// Read a batch of purchases
    ///
    /// Reads lines until `batch_size` purchases are complete or the file ends.
    /// Malformed lines and rejected purchases are logged and skipped.
    ///
    /// # Returns
    ///
    /// A vector of successfully assembled purchases.
    /// Returns an empty vector once the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<PurchaseRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        if self.finished {
            return batch;
        }

        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => {
                    if let Some(pending) = self.grouper.push(csv_record) {
                        push_converted(&mut batch, pending);
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %InputError::from(e), "skipping malformed line");
                }
                None => {
                    if let Some(pending) = self.grouper.finish() {
                        push_converted(&mut batch, pending);
                    }
                    self.finished = true;
                    break;
                }
            }
        }

        batch
    }
}

fn push_converted(batch: &mut Vec<PurchaseRecord>, pending: PendingPurchase) {
    match convert_purchase(pending) {
        Ok(record) => batch.push(record),
        Err(e) => warn!(error = %e, "skipping rejected purchase"),
    }
}
