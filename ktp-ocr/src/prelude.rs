//! Convenience re-exports for common usage.
//!
//! ```no_run
//! use ktp_ocr::prelude::*;
//! ```

pub use crate::client::Client;
pub use crate::config::ClientConfig;
pub use crate::errors::Error;
pub use crate::gemini::{GeminiExtractor, GeminiRegionVerifier};

pub use gemini_adapter::{GEMINI_FLASH, GEMINI_PRO, GeminiClient, GeminiConfig};
pub use ktp_ocr_core::{
    DocumentReport, ExtractionResult, Gender, IssueCode, RetryPolicy, StaticRegionTable,
};
