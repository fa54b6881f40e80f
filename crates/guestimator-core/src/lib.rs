//! Guestimator Core Library
//!
//! Domain models, error types, configuration, file validation, preview decoding and the
//! headless form reducer shared by the API client and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod preview;
pub mod state;
pub mod validator;
pub mod view;

// Re-export commonly used types
pub use config::FormConfig;
pub use error::{LogLevel, SubmitError, ValidationError};
pub use preview::PreviewDecoder;
pub use state::{check_preconditions, FormEvent, FormReducer, QuoteRequest, UploadForm};
pub use validator::{content_type_for_filename, FileValidator};
pub use view::FormView;
