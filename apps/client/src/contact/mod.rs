//! Contact form submission.
//!
//! The form talks to a [`ContactApi`]. The hosted build injects
//! [`HttpContactApi`], which posts to the backend; the static build injects
//! [`LocalContactApi`], which keeps messages in browser-style key/value
//! storage. Both return the stored [`ContactMessage`].

pub mod form;
pub mod http;
pub mod local;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use portfolio_shared::{ContactMessage, InsertContactMessage};

use crate::error::ClientError;

pub use form::{ContactForm, SubmitOutcome};
pub use http::HttpContactApi;
pub use local::{FileStorage, KeyValueStorage, LocalContactApi, MemoryStorage};

/// Relative path of the resume bundled into the static build.
pub const STATIC_RESUME_PATH: &str = "./UmeshmResume.pdf";

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, input: &InsertContactMessage) -> Result<ContactMessage, ClientError>;
}

/// How the site is deployed, which decides where contact messages go.
#[derive(Clone)]
pub enum SiteVariant {
    /// Served next to the API. `api_base` is the origin, e.g.
    /// `https://example.com`.
    Hosted { api_base: String },
    /// Static hosting with no backend.
    Static { storage: Arc<dyn KeyValueStorage> },
}

impl fmt::Debug for SiteVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteVariant::Hosted { api_base } => f
                .debug_struct("Hosted")
                .field("api_base", api_base)
                .finish(),
            SiteVariant::Static { .. } => f.debug_struct("Static").finish_non_exhaustive(),
        }
    }
}

impl SiteVariant {
    pub fn contact_api(&self) -> Arc<dyn ContactApi> {
        match self {
            SiteVariant::Hosted { api_base } => Arc::new(HttpContactApi::new(api_base)),
            SiteVariant::Static { storage } => Arc::new(LocalContactApi::new(storage.clone())),
        }
    }

    /// Link target of the "Download Resume" buttons.
    pub fn resume_href(&self) -> String {
        match self {
            SiteVariant::Hosted { api_base } => {
                format!("{}/api/resume", api_base.trim_end_matches('/'))
            }
            SiteVariant::Static { .. } => STATIC_RESUME_PATH.to_string(),
        }
    }
}
