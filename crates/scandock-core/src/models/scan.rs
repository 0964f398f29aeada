use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::ScanError;

/// Default resolution for manual and automatic scans.
pub const DEFAULT_RESOLUTION_DPI: u32 = 300;

/// Letter-size scan region in 1/300 inch units. Not negotiated with the scanner.
pub const LETTER_WIDTH_PWG: u32 = 2550;
pub const LETTER_HEIGHT_PWG: u32 = 3300;

pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intent {
    #[default]
    Document,
    Photo,
    TextAndGraphic,
    Preview,
}

impl Display for Intent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Intent::Document => write!(f, "Document"),
            Intent::Photo => write!(f, "Photo"),
            Intent::TextAndGraphic => write!(f, "TextAndGraphic"),
            Intent::Preview => write!(f, "Preview"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ColorMode {
    #[default]
    RGB24,
    Grayscale8,
    BlackAndWhite1,
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ColorMode::RGB24 => write!(f, "RGB24"),
            ColorMode::Grayscale8 => write!(f, "Grayscale8"),
            ColorMode::BlackAndWhite1 => write!(f, "BlackAndWhite1"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RGB24" => Ok(ColorMode::RGB24),
            "Grayscale8" => Ok(ColorMode::Grayscale8),
            "BlackAndWhite1" => Ok(ColorMode::BlackAndWhite1),
            _ => Err(ScanError::InvalidInput(format!(
                "Invalid color_mode '{}': expected RGB24, Grayscale8 or BlackAndWhite1",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputSource {
    Platen,
    Adf,
}

impl Display for InputSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InputSource::Platen => write!(f, "Platen"),
            InputSource::Adf => write!(f, "Adf"),
        }
    }
}

impl FromStr for InputSource {
    type Err = ScanError;

    /// Case-insensitive; the scanner always receives the canonical spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "platen" => Ok(InputSource::Platen),
            "adf" => Ok(InputSource::Adf),
            _ => Err(ScanError::InvalidInput(format!(
                "Invalid source '{}': expected Platen or Adf",
                s
            ))),
        }
    }
}

/// Parameters of one eSCL scan job. Built fresh for every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    pub intent: Intent,
    pub resolution_dpi: u32,
    pub color_mode: ColorMode,
    pub input_source: InputSource,
    pub region_width: u32,
    pub region_height: u32,
    pub document_format: String,
}

impl ScanSettings {
    /// Settings for a PDF document scan of a letter-size region.
    pub fn document(resolution_dpi: u32, color_mode: ColorMode, input_source: InputSource) -> Self {
        Self {
            intent: Intent::Document,
            resolution_dpi,
            color_mode,
            input_source,
            region_width: LETTER_WIDTH_PWG,
            region_height: LETTER_HEIGHT_PWG,
            document_format: PDF_MIME.to_string(),
        }
    }
}

/// Location of an open scan job on the scanner, as returned in the `Location`
/// header of the job creation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJobHandle(String);

impl ScanJobHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn location(&self) -> &str {
        &self.0
    }

    pub fn next_document_url(&self) -> String {
        format!("{}/NextDocument", self.0.trim_end_matches('/'))
    }
}

impl Display for ScanJobHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// A caller's request for one scan, before source auto-detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub resolution: u32,
    pub color_mode: ColorMode,
    /// `None` lets the orchestrator pick the feeder when the scanner has one.
    pub source: Option<InputSource>,
    pub title: Option<String>,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION_DPI,
            color_mode: ColorMode::RGB24,
            source: None,
            title: None,
        }
    }
}

impl ScanRequest {
    /// The request the auto-scan supervisor issues when the feeder is loaded.
    pub fn from_feeder() -> Self {
        Self {
            source: Some(InputSource::Adf),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.resolution == 0 {
            return Err(ScanError::InvalidInput(
                "resolution must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// A finished scan that has been handed to the archive.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub document: Bytes,
    pub source: InputSource,
    pub filename: String,
}

impl ScanResult {
    pub fn byte_count(&self) -> usize {
        self.document.len()
    }

    pub fn message(&self) -> String {
        format!(
            "Scanned {} bytes and uploaded to Paperless",
            self.byte_count()
        )
    }
}

/// `scan_YYYYMMDD_HHMMSS.pdf` for the given local time.
pub fn scan_filename<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("scan_{}.pdf", at.format("%Y%m%d_%H%M%S"))
}
