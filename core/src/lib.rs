//! Extraction and semantic validation pipeline for Indonesian identity
//! cards (KTP).
//!
//! The pipeline runs in two stages behind one orchestrator:
//!
//! - [`ExtractionOrchestrator`] - drives one document request end to end
//! - [`SemanticValidator`] - cross-checks records against the identifier
//! - [`codec`] - pure decode/encode of the 16-digit identity number
//! - [`RegionRegistry`] - pluggable region-existence capability
//! - [`RetryPolicy`] - bounded exponential backoff for provider calls
//!
//! Provider integrations implement [`DocumentExtractor`] and
//! [`RegionRegistry`]; this crate contains no transport code.

pub mod codec;
pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod prompt;
pub mod record;
pub mod registry;
pub mod retry;
pub mod sanitize;
pub mod schema;
pub mod session;
pub mod validator;

pub use config::PipelineConfig;
pub use error::{MalformedIdentifierError, PipelineError, ProviderError, ValidationError};
pub use metrics::{PipelineMetrics, estimate_tokens};
pub use orchestrator::{DocumentExtractor, ExtractionOrchestrator};
pub use record::{
    DEFAULT_CITIZENSHIP, DocumentReport, EXPIRY_LIFETIME, ExtractionResult, Gender, IssueCode,
    RawDocumentInput,
};
pub use registry::{Confidence, RegionRegistry, RegionVerification, StaticRegionTable};
pub use retry::RetryPolicy;
pub use sanitize::{parse_record, sanitize};
pub use session::RequestSession;
pub use validator::{MINIMUM_AGE_YEARS, SemanticValidator, ValidationOutcome};
