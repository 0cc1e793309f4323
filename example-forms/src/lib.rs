pub mod registration;

// Re-export registration types
pub use registration::{
    Registration, account_information, contact_information, passwords_match,
    personal_information, validate_email,
};
