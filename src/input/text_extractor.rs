//! Text extraction from various document formats
//!
//! Extractors operate on raw in-memory bytes: the pipeline receives document
//! blobs from its caller, never paths. File reading belongs to the CLI layer.

use crate::error::{Result, ResumeRankerError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract concatenates per-page text in page order.
        let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeRankerError::PdfExtraction(format!("Failed to extract text from PDF: {}", e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let cursor = std::io::Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
            ResumeRankerError::DocxExtraction(format!("Not a DOCX archive: {}", e))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ResumeRankerError::DocxExtraction(format!("Missing document part: {}", e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ResumeRankerError::DocxExtraction(format!("Unreadable document part: {}", e)))?;

        Self::paragraphs_from_xml(&xml)
    }
}

impl DocxExtractor {
    /// Walk `word/document.xml`, concatenating `<w:t>` runs and joining
    /// paragraphs with newlines in document order.
    fn paragraphs_from_xml(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text_run => {
                    let run = t.unescape().map_err(|e| {
                        ResumeRankerError::DocxExtraction(format!("Malformed text run: {}", e))
                    })?;
                    current.push_str(&run);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ResumeRankerError::DocxExtraction(format!(
                        "Malformed document XML: {}",
                        e
                    )))
                }
                _ => {}
            }
        }

        if !current.is_empty() {
            paragraphs.push(current);
        }

        Ok(paragraphs.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ResumeRankerError::TextDecoding(format!("Invalid UTF-8: {}", e)))
    }
}
