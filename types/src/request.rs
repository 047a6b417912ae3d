//! The inbound verification request.

use serde::{Deserialize, Serialize};

use crate::RequestError;

/// One customer's identity data, supplied once per verification and never mutated.
///
/// Serialized with camelCase keys, matching what callers post to the HTTP boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Caller-side correlation id.
    #[serde(default)]
    pub request_id: Option<String>,

    // ── Identity ──────────────────────────────────────────────────────────
    pub customer_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub nationality: String,

    // ── Document ──────────────────────────────────────────────────────────
    pub document_type: String,
    pub document_number: String,
    #[serde(default)]
    pub document_expiry: Option<String>,
    #[serde(default)]
    pub document_image_url: Option<String>,

    // ── Biometric ─────────────────────────────────────────────────────────
    pub selfie_url: String,
    pub id_photo_url: String,

    // ── Address ───────────────────────────────────────────────────────────
    pub address: String,
    #[serde(default)]
    pub proof_type: Option<String>,
    #[serde(default)]
    pub proof_date: Option<String>,
    #[serde(default)]
    pub proof_url: Option<String>,
}

impl VerificationRequest {
    /// Check that every field a provider payload needs is present.
    ///
    /// Returns the first blank required field, in declaration order.
    pub fn validate(&self) -> Result<(), RequestError> {
        let required: [(&'static str, &str); 9] = [
            ("customerId", &self.customer_id),
            ("fullName", &self.full_name),
            ("dateOfBirth", &self.date_of_birth),
            ("nationality", &self.nationality),
            ("documentType", &self.document_type),
            ("documentNumber", &self.document_number),
            ("selfieUrl", &self.selfie_url),
            ("idPhotoUrl", &self.id_photo_url),
            ("address", &self.address),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(RequestError::MissingField(*name)),
            None => Ok(()),
        }
    }
}
