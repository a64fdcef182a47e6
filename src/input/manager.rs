//! Document ingestion: format dispatch and failure absorption

use crate::input::file_detector::FileType;
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// An uploaded document, immutable once handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub raw_bytes: Vec<u8>,
}

impl Document {
    pub fn new(filename: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            raw_bytes,
        }
    }

    /// Lower-cased filename suffix. Dispatch happens on this alone, never on
    /// content sniffing.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Outcome of ingesting a single document. A failed extraction is not an
/// error state: it degrades to empty text and the document proceeds through
/// the rest of the pipeline, with the reason kept for observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractionOutcome {
    Extracted(String),
    Failed(String),
}

impl ExtractionOutcome {
    pub fn text(&self) -> &str {
        match self {
            ExtractionOutcome::Extracted(text) => text,
            ExtractionOutcome::Failed(_) => "",
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ExtractionOutcome::Extracted(_) => None,
            ExtractionOutcome::Failed(reason) => Some(reason),
        }
    }
}

pub struct DocumentIngestor;

impl DocumentIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Convert a document blob into plain text. Never fails: unsupported
    /// formats and corrupt files become `Failed`, so one bad document cannot
    /// abort the batch it arrived in.
    pub fn ingest(&self, document: &Document) -> ExtractionOutcome {
        let file_type = document
            .extension()
            .map(|ext| FileType::from_extension(&ext))
            .unwrap_or(FileType::Unknown);

        let result = match file_type {
            FileType::Pdf => {
                debug!("Extracting text from PDF: {}", document.filename);
                PdfExtractor.extract(&document.raw_bytes)
            }
            FileType::Docx => {
                debug!("Extracting text from DOCX: {}", document.filename);
                DocxExtractor.extract(&document.raw_bytes)
            }
            FileType::Text => {
                debug!("Decoding plain text file: {}", document.filename);
                PlainTextExtractor.extract(&document.raw_bytes)
            }
            FileType::Unknown => Err(crate::error::ResumeRankerError::UnsupportedFormat(
                document.filename.clone(),
            )),
        };

        match result {
            Ok(text) => ExtractionOutcome::Extracted(text),
            Err(e) => {
                warn!("Extraction failed for {}: {}", document.filename, e);
                ExtractionOutcome::Failed(e.to_string())
            }
        }
    }
}

impl Default for DocumentIngestor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_ingestion() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("resume.txt", b"Senior engineer, Python and AWS".to_vec());

        let outcome = ingestor.ingest(&doc);
        assert_eq!(outcome.text(), "Senior engineer, Python and AWS");
        assert!(outcome.failure().is_none());
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("RESUME.TXT", b"plain text".to_vec());

        assert_eq!(ingestor.ingest(&doc).text(), "plain text");
    }

    #[test]
    fn test_unsupported_extension_degrades_to_empty_text() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("resume.rtf", b"{\\rtf1 some rtf}".to_vec());

        let outcome = ingestor.ingest(&doc);
        assert_eq!(outcome.text(), "");
        assert!(outcome.failure().is_some());
    }

    #[test]
    fn test_missing_extension_degrades_to_empty_text() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("resume", b"no extension".to_vec());

        let outcome = ingestor.ingest(&doc);
        assert_eq!(outcome.text(), "");
    }

    #[test]
    fn test_corrupt_pdf_degrades_instead_of_failing() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("resume.pdf", b"not really a pdf".to_vec());

        let outcome = ingestor.ingest(&doc);
        assert_eq!(outcome.text(), "");
        assert!(outcome.failure().is_some());
    }

    #[test]
    fn test_invalid_utf8_txt_degrades() {
        let ingestor = DocumentIngestor::new();
        let doc = Document::new("resume.txt", vec![0xff, 0xfe, 0x00]);

        let outcome = ingestor.ingest(&doc);
        assert_eq!(outcome.text(), "");
        assert!(outcome.failure().unwrap().contains("UTF-8"));
    }
}
