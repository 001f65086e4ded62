//! Region-verification capability contract and offline fallback.
//!
//! The first six identifier digits name an administrative region. Whether
//! that region exists is knowledge the pipeline does not own, so it is
//! modeled as a capability behind [`RegionRegistry`]: production wires in
//! a search-grounded implementation, tests use stubs, and
//! [`StaticRegionTable`] gives an offline answer from the province table
//! alone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Confidence a registry attaches to its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Weak signal; advisory only.
    Low,
    /// Corroborated but not authoritative.
    Medium,
    /// Authoritative source confirmed the answer.
    High,
}

/// Answer from a region-verification capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionVerification {
    /// Whether the region code denotes a real administrative area;
    /// `None` when the capability could not decide.
    #[serde(default)]
    pub valid: Option<bool>,
    /// How much weight the verdict carries.
    pub confidence: Confidence,
}

impl RegionVerification {
    /// Verdict for an unreachable or undecided registry.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            valid: None,
            confidence: Confidence::Low,
        }
    }
}

/// Capability that checks whether a 6-digit region code exists.
#[async_trait]
pub trait RegionRegistry: Send + Sync {
    /// Verifies `region_code` against administrative records.
    ///
    /// # Errors
    /// [`ProviderError::Transient`] for outages worth retrying,
    /// [`ProviderError::Fatal`] otherwise. Implementations that can
    /// produce a degraded answer should prefer
    /// [`RegionVerification::unknown`] over an error.
    async fn verify(&self, region_code: &str) -> Result<RegionVerification, ProviderError>;
}

/// Offline registry backed by the national statistics province table.
///
/// Knows province codes only (the first digit pair), so affirmative
/// verdicts are capped at [`Confidence::Medium`] and negative ones at
/// [`Confidence::Low`]: a two-digit match says nothing about the regency
/// and district pairs, and the table itself ages.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegionTable;

/// BPS province codes, including the four provinces added in 2022.
const PROVINCE_CODES: &[&str] = &[
    "11", "12", "13", "14", "15", "16", "17", "18", "19", "21", // Sumatra
    "31", "32", "33", "34", "35", "36", // Java
    "51", "52", "53", // Bali, Nusa Tenggara
    "61", "62", "63", "64", "65", // Kalimantan
    "71", "72", "73", "74", "75", "76", // Sulawesi
    "81", "82", // Maluku
    "91", "92", "93", "94", "95", "96", // Papua
];

#[async_trait]
impl RegionRegistry for StaticRegionTable {
    async fn verify(&self, region_code: &str) -> Result<RegionVerification, ProviderError> {
        let Some(province) = region_code.get(0..2) else {
            return Ok(RegionVerification::unknown());
        };

        if PROVINCE_CODES.contains(&province) {
            Ok(RegionVerification {
                valid: Some(true),
                confidence: Confidence::Medium,
            })
        } else {
            Ok(RegionVerification {
                valid: Some(false),
                confidence: Confidence::Low,
            })
        }
    }
}
