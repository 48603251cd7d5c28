use std::{fs, path::Path, thread};

use crate::{errors::HistoryError, parsers::prelude::*};
use tracing::{debug, warn};

const INLINE_SOURCE: &str = "<inline>";

/// Parses a single activity export, from inline content or a file path.
#[derive(Debug, Default)]
pub struct ParserBuilder {
    content: Option<String>,
    filepath: Option<String>,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    /// Name used when reporting this source.
    pub fn label(&self) -> &str {
        self.filepath.as_deref().unwrap_or(INLINE_SOURCE)
    }

    pub fn parse(self) -> Result<Vec<RawTransaction>, HistoryError> {
        let label = self.label().to_string();

        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .as_deref()
                    .ok_or(HistoryError::MissingContentAndFilepath)
                    .and_then(|path| fs::read_to_string(path).map_err(Into::into))
            })?;

        if !CsvParser::is_supported(self.filepath.as_deref(), &content) {
            debug!(file = %label, "unrecognised header, reading fields by position");
        }

        let transactions = CsvParser::parse(&content).map_err(HistoryError::ParseFailed)?;
        debug!(file = %label, rows = transactions.len(), "parsed activity file");

        Ok(transactions)
    }

    /// Parses and resolves every row into `T`; the first row that fails to
    /// convert fails the whole file.
    pub fn parse_into<T>(self) -> Result<Vec<T>, HistoryError>
    where
        T: TryFrom<RawTransaction, Error = HistoryError>,
    {
        self.parse()?
            .into_iter()
            .map(T::try_from)
            .collect()
    }
}

/// A set of activity exports uploaded together.
///
/// Files are parsed concurrently and concatenated in the order they were
/// added. The batch is all-or-nothing: if any file fails, no rows are
/// returned and the error names the first failing file in that order.
#[derive(Debug, Default)]
pub struct UploadBatch {
    sources: Vec<ParserBuilder>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy();
        self.sources.push(ParserBuilder::new().filename(&path));
        self
    }

    pub fn content(mut self, filename: &str, content: &str) -> Self {
        self.sources.push(ParserBuilder::new().filename(filename).content(content));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn parse(self) -> Result<Vec<RawTransaction>, HistoryError> {
        if self.sources.is_empty() {
            return Err(HistoryError::EmptyBatch);
        }

        let results: Vec<(String, Result<Vec<RawTransaction>, HistoryError>)> =
            thread::scope(|scope| {
                let handles: Vec<_> = self
                    .sources
                    .into_iter()
                    .map(|source| {
                        let label = source.label().to_string();
                        (label, scope.spawn(move || source.parse()))
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|(label, handle)| {
                        let result = handle.join().unwrap_or_else(|_| {
                            Err(HistoryError::ParseFailed("parser thread panicked".to_string()))
                        });
                        (label, result)
                    })
                    .collect()
            });

        let mut transactions = Vec::new();
        for (label, result) in results {
            match result {
                Ok(rows) => transactions.extend(rows),
                Err(err) => {
                    warn!(file = %label, error = %err, "upload batch aborted");
                    return Err(HistoryError::for_file(&label, err));
                }
            }
        }

        Ok(transactions)
    }
}
