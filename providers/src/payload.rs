//! Provider-specific request payloads.
//!
//! Each payload is a field subset of [`VerificationRequest`]; building one is
//! pure renaming with no business logic.

use kyc_types::VerificationRequest;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    pub customer_id: String,
    pub document_type: String,
    pub document_number: String,
    pub expiry_date: Option<String>,
    pub document_image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricPayload {
    pub customer_id: String,
    pub selfie_url: String,
    pub id_photo_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub customer_id: String,
    pub address: String,
    pub proof_type: Option<String>,
    pub proof_date: Option<String>,
    pub proof_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionsPayload {
    pub customer_id: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub nationality: String,
}

impl From<&VerificationRequest> for DocumentPayload {
    fn from(req: &VerificationRequest) -> Self {
        Self {
            customer_id: req.customer_id.clone(),
            document_type: req.document_type.clone(),
            document_number: req.document_number.clone(),
            expiry_date: req.document_expiry.clone(),
            document_image_url: req.document_image_url.clone(),
        }
    }
}

impl From<&VerificationRequest> for BiometricPayload {
    fn from(req: &VerificationRequest) -> Self {
        Self {
            customer_id: req.customer_id.clone(),
            selfie_url: req.selfie_url.clone(),
            id_photo_url: req.id_photo_url.clone(),
        }
    }
}

impl From<&VerificationRequest> for AddressPayload {
    fn from(req: &VerificationRequest) -> Self {
        Self {
            customer_id: req.customer_id.clone(),
            address: req.address.clone(),
            proof_type: req.proof_type.clone(),
            proof_date: req.proof_date.clone(),
            proof_url: req.proof_url.clone(),
        }
    }
}

impl From<&VerificationRequest> for SanctionsPayload {
    fn from(req: &VerificationRequest) -> Self {
        Self {
            customer_id: req.customer_id.clone(),
            full_name: req.full_name.clone(),
            date_of_birth: req.date_of_birth.clone(),
            nationality: req.nationality.clone(),
        }
    }
}
