//! Prompt construction for the extraction and region-verification
//! capabilities.
//!
//! Prompts are fixed text plus interpolated request data; nothing here
//! depends on the provider wire format.

use chrono::NaiveDate;

/// Standing instruction for every extraction request.
pub const EXTRACTION_INSTRUCTION: &str = r#"You are an expert OCR and data-extraction assistant for the Indonesian identity card (KTP).
Your goal is to read the supplied document image and extract the fields defined by the output schema.

1. Analyse the provided KTP document image.
2. Extract every schema field as accurately as you can.
3. Place and date of birth share one printed line (for example "JAKARTA, 17-08-1945").
   You MUST split it: the text before the comma is birth_place, the digit run after it is birth_date.
4. Format dates as YYYY-MM-DD whenever the printed date is legible.
5. Use null for any field that is unreadable or not present; never guess.
6. Set expiry_date to "LIFETIME" when the card reads "SEUMUR HIDUP"; otherwise copy the printed date.
7. Respond with ONLY the final JSON object matching the schema, no surrounding prose."#;

/// Short task line accompanying the image part.
pub const EXTRACTION_PROMPT: &str = "Extract the identity fields from this KTP image.";

/// Full instruction text sent alongside the document bytes.
#[must_use]
pub fn extraction_instruction() -> String {
    format!("{EXTRACTION_INSTRUCTION}\n\n{EXTRACTION_PROMPT}")
}

/// Builds the search-grounded region-verification prompt.
#[must_use]
pub fn region_verification_prompt(region_code: &str, today: NaiveDate) -> String {
    let mut prompt = String::with_capacity(512);
    prompt.push_str("You are a high-precision validation engine for Indonesian identity cards (KTP).\n\n");
    prompt.push_str(&format!("Today's date: {today}.\n\n"));
    prompt.push_str(
        "Verify whether the 6-digit NIK region prefix below denotes a real Indonesian administrative region.\n",
    );
    prompt.push_str(
        "Digits 1-2 are the province, digits 3-4 the regency or city, digits 5-6 the district.\n",
    );
    prompt.push_str("Use web search to confirm the code against current administrative records.\n\n");
    prompt.push_str(&format!("Region code: {region_code}\n\n"));
    prompt.push_str("Respond with ONLY a JSON object of the form ");
    prompt.push_str(r#"{"valid": true|false, "confidence": "low"|"medium"|"high"}"#);
    prompt.push_str(", with no markdown formatting.");
    prompt
}
