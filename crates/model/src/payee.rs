use crate::fields::{self, payee};
use crate::{ModelError, RawRecord};

/// The singleton payee record shown in the document footer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayeeInfo {
    pub address: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_number: String,
    pub payee_name: String,
    pub account_number: String,
    pub sort_code: String,
    pub vat_number: String,
}

impl PayeeInfo {
    pub fn from_fields(record: &RawRecord) -> Result<Self, ModelError> {
        Ok(Self {
            address: fields::require_string(record, "payee", payee::ADDRESS)?,
            contact_name: fields::require_string(record, "payee", payee::CONTACT_NAME)?,
            contact_email: fields::require_string(record, "payee", payee::CONTACT_EMAIL)?,
            contact_number: fields::require_string(record, "payee", payee::CONTACT_NUMBER)?,
            payee_name: fields::require_string(record, "payee", payee::PAYEE_NAME)?,
            account_number: fields::require_string(record, "payee", payee::ACCOUNT_NUMBER)?,
            sort_code: fields::require_string(record, "payee", payee::SORT_CODE)?,
            vat_number: fields::require_string(record, "payee", payee::VAT_NUMBER)?,
        })
    }
}
