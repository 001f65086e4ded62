//! Canonical record shape for extracted KTP documents.
//!
//! [`ExtractionResult`] is the single record type flowing through the
//! pipeline: the extraction capability produces it, the validator
//! cross-checks it, and the caller receives it. Deserialization is
//! deliberately tolerant of model output quirks (fenced dates in either
//! print order, localized gender labels, missing fields), while
//! serialization is canonical.

use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::metrics::PipelineMetrics;

/// Citizenship recorded when the card omits or garbles the field.
pub const DEFAULT_CITIZENSHIP: &str = "WNI";

/// Expiry marker for cards printed with "SEUMUR HIDUP".
pub const EXPIRY_LIFETIME: &str = "LIFETIME";

/// One document submitted for processing: raw bytes plus their MIME type.
///
/// The input is owned for the duration of the request and never mutated.
#[derive(Debug, Clone)]
pub struct RawDocumentInput {
    /// Scanned document bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl RawDocumentInput {
    /// Bundles document bytes with their MIME type.
    #[must_use]
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Gender as printed on the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// "LAKI-LAKI" on the card.
    Male,
    /// "PEREMPUAN" on the card.
    Female,
    /// Unreadable or absent.
    #[default]
    Unknown,
}

impl Gender {
    /// Maps a printed or model-produced label onto a variant.
    ///
    /// Accepts the Indonesian card labels, their single-letter
    /// abbreviations, and the English serialization forms.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "MALE" | "LAKI-LAKI" | "LAKI LAKI" | "L" | "M" => Self::Male,
            "FEMALE" | "PEREMPUAN" | "P" | "F" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map_or(Self::Unknown, Self::from_label))
    }
}

/// Date handling tolerant of the two orders seen in model output.
pub(crate) mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

    /// Accepts ISO dates and the DD-MM-YYYY order printed on cards.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
            .ok()
    }
}

fn default_citizenship() -> String {
    DEFAULT_CITIZENSHIP.to_string()
}

fn default_expiry() -> String {
    EXPIRY_LIFETIME.to_string()
}

fn de_citizenship<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_citizenship))
}

fn de_expiry<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_expiry))
}

/// Structured fields extracted from one KTP document.
///
/// Every field the model could not read is `None` (or the documented
/// default); absence is never an error at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    /// 16-digit national identity number.
    #[serde(default)]
    pub nik: Option<String>,
    /// Full name as printed.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Place of birth (the text before the comma on the card).
    #[serde(default)]
    pub birth_place: Option<String>,
    /// Date of birth.
    #[serde(default, deserialize_with = "lenient_date::deserialize")]
    pub birth_date: Option<NaiveDate>,
    /// Gender.
    #[serde(default)]
    #[schemars(with = "Option<Gender>")]
    pub gender: Gender,
    /// Blood type, when printed.
    #[serde(default)]
    pub blood_type: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Neighborhood / community unit pair (RT/RW).
    #[serde(default)]
    pub rt_rw: Option<String>,
    /// Village (kelurahan or desa).
    #[serde(default)]
    pub village: Option<String>,
    /// District (kecamatan).
    #[serde(default)]
    pub district: Option<String>,
    /// Religion.
    #[serde(default)]
    pub religion: Option<String>,
    /// Marital status.
    #[serde(default)]
    pub marital_status: Option<String>,
    /// Occupation.
    #[serde(default)]
    pub occupation: Option<String>,
    /// Citizenship code.
    #[serde(default = "default_citizenship", deserialize_with = "de_citizenship")]
    pub citizenship: String,
    /// Expiry; modern cards carry [`EXPIRY_LIFETIME`].
    #[serde(default = "default_expiry", deserialize_with = "de_expiry")]
    pub expiry_date: String,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            nik: None,
            full_name: None,
            birth_place: None,
            birth_date: None,
            gender: Gender::Unknown,
            blood_type: None,
            address: None,
            rt_rw: None,
            village: None,
            district: None,
            religion: None,
            marital_status: None,
            occupation: None,
            citizenship: default_citizenship(),
            expiry_date: default_expiry(),
        }
    }
}

/// Validation findings attached to a processed document.
///
/// Issue codes are advisory or fatal depending on the code; see
/// [`IssueCode::is_fatal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// No identifier was extracted.
    MissingId,
    /// The identifier failed structural checks.
    MalformedId,
    /// The identifier's embedded birth date is not a real date.
    InvalidDobEncoding,
    /// Extracted birth date disagrees with the identifier.
    DobMismatch,
    /// Extracted gender disagrees with the identifier's day offset.
    GenderMismatch,
    /// The region prefix could not be confirmed.
    RegionUnverified,
    /// The region prefix was confidently rejected.
    RegionInvalid,
    /// The bearer is younger than the card-issuing age.
    Underage,
    /// Model output could not be parsed into a record.
    ParseFailed,
    /// Validation never ran; the record is unchecked.
    ValidationUnavailable,
}

impl IssueCode {
    /// Wire form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingId => "MISSING_ID",
            Self::MalformedId => "MALFORMED_ID",
            Self::InvalidDobEncoding => "INVALID_DOB_ENCODING",
            Self::DobMismatch => "DOB_MISMATCH",
            Self::GenderMismatch => "GENDER_MISMATCH",
            Self::RegionUnverified => "REGION_UNVERIFIED",
            Self::RegionInvalid => "REGION_INVALID",
            Self::Underage => "UNDERAGE",
            Self::ParseFailed => "PARSE_FAILED",
            Self::ValidationUnavailable => "VALIDATION_UNAVAILABLE",
        }
    }

    /// `true` when the code alone makes the document invalid.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(
            self,
            Self::MissingId | Self::MalformedId | Self::RegionInvalid | Self::Underage
        )
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the pipeline knows about one processed document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// The extracted record, after any identifier-derived correction.
    pub record: ExtractionResult,
    /// `false` when any fatal issue was found.
    pub is_valid: bool,
    /// All findings, fatal and advisory, in detection order.
    pub issues: Vec<IssueCode>,
    /// `true` when `record` was rewritten from the identifier encoding.
    pub corrected_from_identifier: bool,
    /// Timing and token accounting for the run.
    pub metrics: PipelineMetrics,
}
