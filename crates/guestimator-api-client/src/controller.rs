//! Async driver for the upload form.
//!
//! Owns the form state and applies every change through the reducer. All methods take
//! `&mut self`, so a form has at most one submission or decode pending at a time.

use anyhow::Result;
use guestimator_core::models::{CandidateFile, FileSource, QuoteResponse, SubmissionResult};
use guestimator_core::{
    check_preconditions, FormConfig, FormEvent, FormReducer, LogLevel, PreviewDecoder,
    SubmitError, UploadForm,
};

use crate::ApiClient;

pub struct FormController {
    client: ApiClient,
    reducer: FormReducer,
    state: UploadForm,
}

/// Ends the in-flight state if the submission future is dropped before it finishes.
struct InFlightGuard<'a> {
    reducer: &'a FormReducer,
    state: &'a mut UploadForm,
    finished: bool,
}

impl InFlightGuard<'_> {
    fn finish(mut self, outcome: Result<QuoteResponse, SubmitError>) {
        *self.state = self
            .reducer
            .reduce(&*self.state, FormEvent::SubmissionFinished(outcome));
        self.finished = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.finished && self.state.is_uploading() {
            tracing::warn!("Submission interrupted before completion");
            *self.state = self.reducer.reduce(
                &*self.state,
                FormEvent::SubmissionFinished(Err(SubmitError::Unknown(
                    "Submission was interrupted".to_string(),
                ))),
            );
        }
    }
}

fn log_failure(e: &SubmitError) {
    match e.log_level() {
        LogLevel::Debug => tracing::debug!(code = e.error_code(), error = %e, "Upload failed"),
        LogLevel::Warn => tracing::warn!(code = e.error_code(), error = %e, "Upload failed"),
        LogLevel::Error => tracing::error!(code = e.error_code(), error = %e, "Upload failed"),
    }
}

impl FormController {
    pub fn new(client: ApiClient, reducer: FormReducer) -> Self {
        Self {
            client,
            reducer,
            state: UploadForm::default(),
        }
    }

    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Ok(Self::new(
            ApiClient::from_config(config)?,
            FormReducer::from_config(config),
        ))
    }

    pub fn state(&self) -> &UploadForm {
        &self.state
    }

    /// Apply a synchronous event (field edits, drag flags, alert dismissal).
    pub fn dispatch(&mut self, event: FormEvent) -> &UploadForm {
        self.state = self.reducer.reduce(&self.state, event);
        &self.state
    }

    /// Take a file from the picker or a drop (`None` = picker dismissed), then decode its
    /// preview when it was accepted.
    pub async fn select_file(
        &mut self,
        source: FileSource,
        file: Option<CandidateFile>,
    ) -> &UploadForm {
        let event = match source {
            FileSource::Picker => FormEvent::FileProvided { source, file },
            FileSource::Drop => FormEvent::Dropped(file),
        };
        self.dispatch(event);

        let Some(selected) = self.state.selected_file.clone() else {
            return &self.state;
        };
        let selection_id = self.state.selection_id;
        let result = PreviewDecoder::decode_file(&selected).await;
        self.dispatch(FormEvent::PreviewDecoded {
            selection_id,
            result,
        })
    }

    /// Run the preconditions and, when they pass, perform the single outbound request.
    pub async fn submit(&mut self) -> &SubmissionResult {
        if self.state.is_uploading() {
            tracing::debug!("Submit ignored while a submission is in flight");
            return &self.state.result;
        }

        self.dispatch(FormEvent::SubmitRequested);
        if !self.state.is_uploading() {
            return &self.state.result;
        }

        let Self {
            client,
            reducer,
            state,
        } = &mut *self;
        let request = check_preconditions(&state.form, state.selected_file.as_ref());
        let guard = InFlightGuard {
            reducer,
            state,
            finished: false,
        };

        let outcome = match request {
            Ok(request) => client.submit_quote(&request).await,
            Err(e) => Err(SubmitError::Validation(e)),
        };
        if let Err(e) = &outcome {
            log_failure(e);
        }
        guard.finish(outcome);

        &self.state.result
    }
}
