//! Billed client details.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The client an invoice is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClientDetails {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub name: String,

    #[validate(email(message = "Enter a valid client email address"))]
    pub email: String,

    pub phone: String,
    pub company: String,
    pub address: String,
}
