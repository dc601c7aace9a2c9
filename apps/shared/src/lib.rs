//! Types shared by the portfolio API server and its browser client.

pub mod envelope;
pub mod schema;

pub use envelope::ApiResponse;
pub use schema::{
    is_valid_email, parse_contact_payload, ContactField, ContactMessage, FieldError,
    InsertContactMessage, ValidationErrors, MIN_MESSAGE_LEN,
};

/// Local-storage key the static build persists contact messages under.
pub const CONTACT_STORAGE_KEY: &str = "contactMessages";

/// Filename the resume is delivered under.
pub const RESUME_DOWNLOAD_NAME: &str = "ModamdaruluUmesh_Resume.pdf";
