//! # ktp-ocr
//!
//! Extract and validate Indonesian KTP identity cards with Gemini.
//!
//! This crate wires the [`ktp_ocr_core`] pipeline to the Gemini API: a
//! multimodal model reads the card image into a structured record, then
//! the semantic validator cross-checks the NIK against the printed birth
//! date and gender, verifies the region code, and enforces the minimum
//! age. Callers get one JSON object per document, valid or not.
//!
//! ## Example
//!
//! ```no_run
//! # use ktp_ocr::prelude::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client (discovers GEMINI_API_KEY automatically)
//! let client = Client::new().await?;
//!
//! // Process a card image; the result is always a JSON object
//! let image = std::fs::read("ktp.jpg")?;
//! let result = client.process_document(image, "image/jpeg", "backoffice").await;
//!
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! Set `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) before constructing a
//! client, or pass a key explicitly through
//! [`config::ClientConfig::with_api_key`].

#![deny(missing_docs)]

/// High-level document-processing client.
pub mod client;

/// Client configuration.
pub mod config;

/// Public error types.
pub mod errors;

/// Gemini-backed pipeline capabilities.
pub mod gemini;

/// Commonly used types and traits.
pub mod prelude;

pub use client::Client;
pub use config::ClientConfig;
pub use errors::Error;
