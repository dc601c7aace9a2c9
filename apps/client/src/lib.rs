//! Browser-side logic of the portfolio site, independent of any renderer.
//!
//! - [`visibility`]: one-shot "entered the viewport" latches.
//! - [`reveal`]: entrance animations and background particles per section.
//! - [`hero`]: the landing section's typing intro and floating icons.
//! - [`showcase`]: the API showcase section and its particle emitter.
//! - [`content`]: projects, skills and profile data.
//! - [`nav`]: navbar scroll-spy.
//! - [`contact`]: the contact form and its hosted/static submission backends.
//! - [`toast`]: notifications.

pub mod contact;
pub mod content;
pub mod error;
pub mod hero;
pub mod nav;
pub mod reveal;
pub mod showcase;
pub mod toast;
pub mod visibility;

pub use contact::{ContactApi, ContactForm, SiteVariant, SubmitOutcome};
pub use error::ClientError;
pub use visibility::{ElementId, Observer, ObserverOptions, ViewportObserver, VisibilityTracker};
