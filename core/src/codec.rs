//! Pure decode/encode for the 16-digit national identity number.
//!
//! Layout: six region digits (province, regency, district as two-digit
//! pairs), six birth-date digits in DDMMYY order with 40 added to the day
//! for female bearers, and a four-digit registration serial. Decoding is
//! structural only; field-level plausibility (real dates, known regions)
//! is judged by the callers in [`crate::validator`].

use chrono::NaiveDate;

use crate::error::MalformedIdentifierError;
use crate::record::{Gender, IssueCode};

/// Required identifier length.
pub const IDENTIFIER_LEN: usize = 16;

/// Added to the day-of-month pair for female bearers.
pub const FEMALE_DAY_OFFSET: u32 = 40;

/// Fields decoded from a well-formed identifier.
///
/// Ephemeral: produced for cross-checking and correction, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIdentifier {
    /// Six-digit administrative region prefix.
    pub region: String,
    /// Day-of-month pair as printed; exceeds 31 for female bearers.
    pub raw_day: u32,
    /// Month-of-year pair.
    pub month: u32,
    /// Two-digit birth year.
    pub year2: u32,
    /// Four-digit registration serial.
    pub serial: String,
}

impl DecodedIdentifier {
    /// Two-digit province code.
    #[must_use]
    pub fn province(&self) -> &str {
        self.region.get(0..2).unwrap_or("")
    }

    /// Two-digit regency or city code.
    #[must_use]
    pub fn regency(&self) -> &str {
        self.region.get(2..4).unwrap_or("")
    }

    /// Two-digit district code.
    #[must_use]
    pub fn district(&self) -> &str {
        self.region.get(4..6).unwrap_or("")
    }

    /// Gender implied by the day pair, or `None` when the pair is outside
    /// both the male (1-31) and female (41-71) ranges.
    #[must_use]
    pub const fn implied_gender(&self) -> Option<Gender> {
        match self.raw_day {
            1..=31 => Some(Gender::Male),
            41..=71 => Some(Gender::Female),
            _ => None,
        }
    }

    /// Day-of-month with the female offset removed.
    #[must_use]
    pub const fn day(&self) -> Option<u32> {
        match self.raw_day {
            1..=31 => Some(self.raw_day),
            41..=71 => Some(self.raw_day - FEMALE_DAY_OFFSET),
            _ => None,
        }
    }
}

/// Splits an identifier into its encoded fields.
///
/// Total over its input: any 16-digit string decodes, including ones with
/// impossible dates or unknown regions. Shorter, longer, or non-numeric
/// input is rejected.
///
/// # Errors
/// [`MalformedIdentifierError`] describing the first structural defect.
pub fn decode(identifier: &str) -> Result<DecodedIdentifier, MalformedIdentifierError> {
    if identifier.len() != IDENTIFIER_LEN {
        return Err(MalformedIdentifierError::WrongLength(identifier.len()));
    }
    if let Some(position) = identifier.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(MalformedIdentifierError::NonDigit(position));
    }

    Ok(DecodedIdentifier {
        region: identifier[0..6].to_owned(),
        raw_day: digit_pair(&identifier[6..8]),
        month: digit_pair(&identifier[8..10]),
        year2: digit_pair(&identifier[10..12]),
        serial: identifier[12..16].to_owned(),
    })
}

/// Reassembles an identifier from decoded fields.
///
/// `encode(&decode(s)?) == s` for every string `decode` accepts.
#[must_use]
pub fn encode(decoded: &DecodedIdentifier) -> String {
    format!(
        "{}{:02}{:02}{:02}{}",
        decoded.region, decoded.raw_day, decoded.month, decoded.year2, decoded.serial
    )
}

/// Resolves the two-digit year into a full birth date.
///
/// Of the 19xx and 20xx candidates, the one closer to `today` wins,
/// provided it does not land in the future. `None` when the encoded
/// day/month pair is not a real date or no candidate qualifies.
#[must_use]
pub fn resolve_birth_date(decoded: &DecodedIdentifier, today: NaiveDate) -> Option<NaiveDate> {
    let day = decoded.day()?;
    let year = i32::try_from(decoded.year2).ok()?;

    let modern = NaiveDate::from_ymd_opt(2000 + year, decoded.month, day);
    match modern {
        Some(date) if date <= today => Some(date),
        _ => NaiveDate::from_ymd_opt(1900 + year, decoded.month, day).filter(|d| *d <= today),
    }
}

/// Compares decoded identifier fields against independently extracted ones.
///
/// Returns the discrepancies found, in detection order. An undecodable
/// date encoding short-circuits to [`IssueCode::InvalidDobEncoding`]
/// because neither comparison is meaningful without it.
#[must_use]
pub fn cross_check(
    decoded: &DecodedIdentifier,
    extracted_birth_date: Option<NaiveDate>,
    extracted_gender: Gender,
    today: NaiveDate,
) -> Vec<IssueCode> {
    let mut issues = Vec::new();

    let (Some(implied_gender), Some(decoded_date)) =
        (decoded.implied_gender(), resolve_birth_date(decoded, today))
    else {
        issues.push(IssueCode::InvalidDobEncoding);
        return issues;
    };

    match extracted_birth_date {
        Some(date) if date == decoded_date => {}
        _ => issues.push(IssueCode::DobMismatch),
    }

    if extracted_gender != implied_gender {
        issues.push(IssueCode::GenderMismatch);
    }

    issues
}

/// Numeric value of a two-character digit slice.
fn digit_pair(pair: &str) -> u32 {
    pair.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_decode_male_identifier() {
        let decoded = decode("3174041708450001").unwrap();
        assert_eq!(decoded.region, "317404");
        assert_eq!(decoded.province(), "31");
        assert_eq!(decoded.regency(), "74");
        assert_eq!(decoded.district(), "04");
        assert_eq!(decoded.raw_day, 17);
        assert_eq!(decoded.month, 8);
        assert_eq!(decoded.year2, 45);
        assert_eq!(decoded.serial, "0001");
        assert_eq!(decoded.implied_gender(), Some(Gender::Male));
        assert_eq!(decoded.day(), Some(17));
    }

    #[test]
    fn test_decode_female_identifier() {
        let decoded = decode("3174045508900002").unwrap();
        assert_eq!(decoded.raw_day, 55);
        assert_eq!(decoded.implied_gender(), Some(Gender::Female));
        assert_eq!(decoded.day(), Some(15));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert_eq!(
            decode("12345"),
            Err(MalformedIdentifierError::WrongLength(5))
        );
        assert_eq!(
            decode("31740417084500011"),
            Err(MalformedIdentifierError::WrongLength(17))
        );
        assert_eq!(decode(""), Err(MalformedIdentifierError::WrongLength(0)));
    }

    #[test]
    fn test_decode_rejects_non_digits() {
        assert_eq!(
            decode("31740417O8450001"),
            Err(MalformedIdentifierError::NonDigit(8))
        );
        assert_eq!(
            decode("x174041708450001"),
            Err(MalformedIdentifierError::NonDigit(0))
        );
    }

    #[test]
    fn test_encode_inverts_decode() {
        for identifier in [
            "3174041708450001",
            "3174045508900002",
            "1101010101000001",
            "9271043112990123",
            "0000009999000000",
        ] {
            let decoded = decode(identifier).unwrap();
            assert_eq!(encode(&decoded), identifier);
        }
    }

    #[test]
    fn test_day_pair_boundaries() {
        let mut decoded = decode("3174040108900001").unwrap();
        for (raw_day, gender, day) in [
            (1, Some(Gender::Male), Some(1)),
            (31, Some(Gender::Male), Some(31)),
            (32, None, None),
            (40, None, None),
            (41, Some(Gender::Female), Some(1)),
            (71, Some(Gender::Female), Some(31)),
            (72, None, None),
            (0, None, None),
        ] {
            decoded.raw_day = raw_day;
            assert_eq!(decoded.implied_gender(), gender, "raw_day {raw_day}");
            assert_eq!(decoded.day(), day, "raw_day {raw_day}");
        }
    }

    #[test]
    fn test_century_resolution_prefers_recent_past() {
        // Year pair 45: 2045 is in the future of 2025, so 1945 wins.
        let decoded = decode("3174041708450001").unwrap();
        assert_eq!(
            resolve_birth_date(&decoded, today()),
            NaiveDate::from_ymd_opt(1945, 8, 17)
        );

        // Year pair 10: 2010 is in the past, closer than 1910.
        let decoded = decode("3174040201100001").unwrap();
        assert_eq!(
            resolve_birth_date(&decoded, today()),
            NaiveDate::from_ymd_opt(2010, 1, 2)
        );
    }

    #[test]
    fn test_century_resolution_boundary_is_today() {
        // Born exactly today resolves to today, not a century back.
        let decoded = decode("3174040101250001").unwrap();
        assert_eq!(
            resolve_birth_date(&decoded, today()),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );

        // One day into the future flips to the earlier century.
        let decoded = decode("3174040201250001").unwrap();
        assert_eq!(
            resolve_birth_date(&decoded, today()),
            NaiveDate::from_ymd_opt(1925, 1, 2)
        );
    }

    #[test]
    fn test_resolution_fails_on_impossible_dates() {
        // Month 13 is not a date in either century.
        let decoded = decode("3174041713450001").unwrap();
        assert_eq!(resolve_birth_date(&decoded, today()), None);

        // Day pair 35 is in neither gender range.
        let decoded = decode("3174043508450001").unwrap();
        assert_eq!(resolve_birth_date(&decoded, today()), None);

        // February 30 does not exist.
        let decoded = decode("3174043002900001").unwrap();
        assert_eq!(resolve_birth_date(&decoded, today()), None);
    }

    #[test]
    fn test_cross_check_clean_record() {
        let decoded = decode("3174041708450001").unwrap();
        let issues = cross_check(
            &decoded,
            NaiveDate::from_ymd_opt(1945, 8, 17),
            Gender::Male,
            today(),
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_cross_check_flags_gender_mismatch() {
        let decoded = decode("3174045508900002").unwrap();
        let issues = cross_check(
            &decoded,
            NaiveDate::from_ymd_opt(1990, 8, 15),
            Gender::Male,
            today(),
        );
        assert_eq!(issues, vec![IssueCode::GenderMismatch]);
    }

    #[test]
    fn test_cross_check_flags_dob_mismatch() {
        let decoded = decode("3174041708450001").unwrap();
        let issues = cross_check(
            &decoded,
            NaiveDate::from_ymd_opt(1946, 8, 17),
            Gender::Male,
            today(),
        );
        assert_eq!(issues, vec![IssueCode::DobMismatch]);

        // An absent extracted date cannot corroborate the identifier.
        let issues = cross_check(&decoded, None, Gender::Male, today());
        assert_eq!(issues, vec![IssueCode::DobMismatch]);
    }

    #[test]
    fn test_cross_check_flags_both_mismatches() {
        let decoded = decode("3174045508900002").unwrap();
        let issues = cross_check(
            &decoded,
            NaiveDate::from_ymd_opt(1991, 1, 1),
            Gender::Male,
            today(),
        );
        assert_eq!(issues, vec![IssueCode::DobMismatch, IssueCode::GenderMismatch]);
    }

    #[test]
    fn test_cross_check_short_circuits_on_bad_encoding() {
        let decoded = decode("3174043508450001").unwrap();
        let issues = cross_check(
            &decoded,
            NaiveDate::from_ymd_opt(1945, 8, 17),
            Gender::Male,
            today(),
        );
        assert_eq!(issues, vec![IssueCode::InvalidDobEncoding]);
    }
}
