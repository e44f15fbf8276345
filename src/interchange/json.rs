//! JSON rendering of the interchange document.

use std::io::Write;

use crate::error::TranslateError;
use crate::model::Model;

use super::{Document, ExportSink, document};

/// Serialize a finished model to a pretty-printed JSON string.
pub fn to_json_string(model: &Model) -> Result<String, TranslateError> {
    Ok(serde_json::to_string_pretty(&document(model))?)
}

/// An [`ExportSink`] writing pretty-printed JSON to any writer.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for JsonWriter<W> {
    fn export(&mut self, document: &Document) -> Result<(), TranslateError> {
        serde_json::to_writer_pretty(&mut self.writer, document)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
