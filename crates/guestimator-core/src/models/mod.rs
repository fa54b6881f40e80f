//! Data models for the upload form
//!
//! Contact details, candidate/selected files and the quote returned by the service.

mod contact;
mod file;
mod quote;
mod submission;

pub use contact::*;
pub use file::*;
pub use quote::*;
pub use submission::*;
