use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    constants::{self, APPROVED_CODE, DECLINE_MESSAGES},
    field::ParsedField,
};

/// The decoded outcome of a purchase or reversal.
///
/// A decline is not an error: `approved` is `false` and `response_code`/
/// `message` describe why, per `spec.md` §7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalResponse {
    pub approved: bool,
    /// Always present: the trimmed value of field 48, or `"--"` if the field
    /// was entirely absent (which is itself a decline per §4.1's strict gate).
    pub response_code: String,
    pub message: String,
    pub auth_code: Option<String>,
    pub amount: Option<String>,
    pub franchise: Option<String>,
    pub account_type: Option<String>,
    pub last4: Option<String>,
    pub masked_pan: Option<String>,
    pub receipt_number: Option<String>,
    pub transaction_date: Option<String>,
    pub transaction_time: Option<String>,
    /// Every field seen, keyed by field type, including ones not promoted to
    /// a named accessor above. Unknown field types are retained here.
    pub fields: BTreeMap<String, ParsedField>,
}

/// Look up the human-readable decline message for a two-digit response code.
///
/// Returns the fixed dictionary message from `spec.md` §6, or
/// `"Código desconocido: <code>"` for any code not in the table.
pub fn decline_message(code: &str) -> String {
    DECLINE_MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, msg)| msg.to_string())
        .unwrap_or_else(|| format!("Código desconocido: {code}"))
}

/// Build a [`TerminalResponse`] from the TLV fields scanned out of a response
/// frame, applying the strict approval gate of `spec.md` §4.1.
pub fn build_response(fields: Vec<ParsedField>) -> TerminalResponse {
    let mut by_type: BTreeMap<String, ParsedField> = BTreeMap::new();
    for field in fields {
        by_type.insert(field.field_type.clone(), field);
    }

    let response_code =
        by_type.get(constants::FIELD_RESPONSE_CODE).map(ParsedField::ascii_trimmed);
    let approved = response_code.as_deref() == Some(APPROVED_CODE);

    let message = if approved {
        "Aprobada".to_string()
    } else {
        decline_message(response_code.as_deref().unwrap_or("--"))
    };

    let get = |ty: &str| by_type.get(ty).map(ParsedField::ascii_trimmed);

    TerminalResponse {
        approved,
        response_code: response_code.unwrap_or_else(|| "--".to_string()),
        message,
        auth_code: get(constants::FIELD_AUTH_CODE),
        amount: get(constants::FIELD_AMOUNT),
        franchise: get(constants::FIELD_FRANCHISE),
        account_type: get(constants::FIELD_ACCOUNT_TYPE),
        last4: get(constants::FIELD_LAST4),
        masked_pan: get(constants::FIELD_MASKED_PAN),
        receipt_number: get(constants::FIELD_RECEIPT_NUMBER),
        transaction_date: by_type
            .get(constants::FIELD_DATE_TIME)
            .map(ParsedField::ascii_trimmed)
            .and_then(|v| v.get(0..8).map(str::to_string)),
        transaction_time: by_type
            .get(constants::FIELD_DATE_TIME)
            .map(ParsedField::ascii_trimmed)
            .and_then(|v| v.get(8..).map(str::to_string)),
        fields: by_type,
    }
}
