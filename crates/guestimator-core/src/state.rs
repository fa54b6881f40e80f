//! Upload form state and its reducer.
//!
//! Every user interaction is a [`FormEvent`]. [`FormReducer::reduce`] maps the current
//! [`UploadForm`] and one event to the next state without touching the network or the screen,
//! so the whole interaction can be exercised headless.

use serde::Serialize;

use crate::config::FormConfig;
use crate::error::{SubmitError, ValidationError};
use crate::models::{
    CandidateFile, ContactField, ContactForm, FileSource, PreviewImage, QuoteResponse,
    SelectedFile, SubmissionResult, VehicleType,
};
use crate::validator::FileValidator;

/// Complete state of one upload form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadForm {
    pub form: ContactForm,
    pub selected_file: Option<SelectedFile>,
    pub preview: Option<PreviewImage>,
    /// Bumped on every file event so late preview results can be discarded.
    pub selection_id: u64,
    pub dragging: bool,
    /// Alert raised by the last file event.
    pub file_alert: Option<String>,
    pub result: SubmissionResult,
}

impl UploadForm {
    pub fn is_uploading(&self) -> bool {
        self.result.is_in_flight()
    }

    /// The submit control is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_uploading()
    }
}

#[derive(Debug)]
pub enum FormEvent {
    FieldChanged(ContactField, String),
    VehicleTypeChanged(Option<VehicleType>),
    /// A picker or drop produced a file, or `None` when the picker was dismissed.
    FileProvided {
        source: FileSource,
        file: Option<CandidateFile>,
    },
    DragEntered,
    DragLeft,
    /// Drop ends dragging and feeds the drop path of the validator.
    Dropped(Option<CandidateFile>),
    PreviewDecoded {
        selection_id: u64,
        result: Result<PreviewImage, ValidationError>,
    },
    SubmitRequested,
    SubmissionFinished(Result<QuoteResponse, SubmitError>),
    AlertDismissed,
}

/// Everything needed to issue the outbound request, taken from a form that passed the
/// submit preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub number: String,
    pub vehicle_type: VehicleType,
    pub file: SelectedFile,
}

/// Submit preconditions, in order: file, vehicle type, then the text fields.
pub fn check_preconditions(
    form: &ContactForm,
    selected_file: Option<&SelectedFile>,
) -> Result<QuoteRequest, ValidationError> {
    let file = selected_file.ok_or(ValidationError::NoFileSelected)?;
    let vehicle_type = form.vehicle_type.ok_or(ValidationError::NoVehicleType)?;
    form.validate_contact()?;

    Ok(QuoteRequest {
        name: form.name.clone(),
        email: form.email.clone(),
        number: form.number.clone(),
        vehicle_type,
        file: file.clone(),
    })
}

#[derive(Clone, Debug)]
pub struct FormReducer {
    validator: FileValidator,
    max_file_size_mb: usize,
    reject_undecodable: bool,
}

impl Default for FormReducer {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

impl FormReducer {
    pub fn from_config(config: &FormConfig) -> Self {
        Self {
            validator: FileValidator::from_config(config),
            max_file_size_mb: config.max_file_size_mb,
            reject_undecodable: config.reject_undecodable,
        }
    }

    pub fn reduce(&self, state: &UploadForm, event: FormEvent) -> UploadForm {
        let mut next = state.clone();

        match event {
            FormEvent::FieldChanged(field, value) => {
                next.form.set_field(field, value);
            }
            FormEvent::VehicleTypeChanged(vehicle_type) => {
                next.form.vehicle_type = vehicle_type;
            }
            FormEvent::FileProvided { source, file } => {
                self.take_file(&mut next, source, file);
            }
            FormEvent::DragEntered => {
                next.dragging = true;
            }
            FormEvent::DragLeft => {
                next.dragging = false;
            }
            FormEvent::Dropped(file) => {
                next.dragging = false;
                self.take_file(&mut next, FileSource::Drop, file);
            }
            FormEvent::PreviewDecoded {
                selection_id,
                result,
            } => {
                self.apply_preview(&mut next, selection_id, result);
            }
            FormEvent::SubmitRequested => {
                self.begin_submit(&mut next);
            }
            FormEvent::SubmissionFinished(outcome) => {
                self.finish_submit(&mut next, outcome);
            }
            FormEvent::AlertDismissed => {
                next.file_alert = None;
            }
        }

        next
    }

    fn take_file(&self, state: &mut UploadForm, source: FileSource, file: Option<CandidateFile>) {
        state.selection_id += 1;
        state.preview = None;

        let Some(candidate) = file else {
            state.selected_file = None;
            state.file_alert = None;
            return;
        };

        match self.validator.validate_candidate(candidate, source) {
            Ok(selected) => {
                state.selected_file = Some(selected);
                state.file_alert = None;
            }
            Err(e) => {
                state.selected_file = None;
                state.file_alert = Some(e.user_message(self.max_file_size_mb));
            }
        }
    }

    fn apply_preview(
        &self,
        state: &mut UploadForm,
        selection_id: u64,
        result: Result<PreviewImage, ValidationError>,
    ) {
        if selection_id != state.selection_id || state.selected_file.is_none() {
            tracing::debug!(
                selection_id,
                current = state.selection_id,
                "Discarding preview for a replaced selection"
            );
            return;
        }

        match result {
            Ok(preview) => state.preview = Some(preview),
            Err(e) if self.reject_undecodable => {
                tracing::warn!(error = %e, "Selected image could not be decoded, clearing selection");
                state.selected_file = None;
                state.preview = None;
                state.file_alert = Some(e.user_message(self.max_file_size_mb));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Selected image could not be decoded, keeping selection");
                state.preview = None;
            }
        }
    }

    fn begin_submit(&self, state: &mut UploadForm) {
        if state.is_uploading() {
            tracing::debug!("Submit ignored while a submission is in flight");
            return;
        }

        match check_preconditions(&state.form, state.selected_file.as_ref()) {
            Ok(_) => state.result = SubmissionResult::InFlight,
            Err(e) => {
                tracing::debug!(error = %e, "Submit precondition failed");
                state.result = SubmissionResult::Failure(e.user_message(self.max_file_size_mb));
            }
        }
    }

    fn finish_submit(&self, state: &mut UploadForm, outcome: Result<QuoteResponse, SubmitError>) {
        if !state.is_uploading() {
            tracing::debug!("Ignoring submission result with no submission in flight");
            return;
        }

        state.result = match outcome {
            Ok(quote) => SubmissionResult::Success(quote),
            Err(e) => SubmissionResult::Failure(e.user_message(self.max_file_size_mb)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_FILE_SIZE_BYTES;

    fn png_candidate(name: &str, size: usize) -> CandidateFile {
        CandidateFile::new(vec![7u8; size], "image/png", name)
    }

    fn filled_form() -> UploadForm {
        UploadForm {
            form: ContactForm::new("Ada", "ada@example.com", "555-0100", Some(VehicleType::Suv)),
            ..UploadForm::default()
        }
    }

    fn pick(reducer: &FormReducer, state: &UploadForm, file: Option<CandidateFile>) -> UploadForm {
        reducer.reduce(
            state,
            FormEvent::FileProvided {
                source: FileSource::Picker,
                file,
            },
        )
    }

    fn preview() -> PreviewImage {
        PreviewImage {
            data_url: "data:image/png;base64,AAAA".to_string(),
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn field_and_vehicle_type_edits() {
        let reducer = FormReducer::default();
        let state = reducer.reduce(
            &UploadForm::default(),
            FormEvent::FieldChanged(ContactField::Name, "Ada".to_string()),
        );
        let state = reducer.reduce(&state, FormEvent::VehicleTypeChanged(Some(VehicleType::Truck)));
        assert_eq!(state.form.name, "Ada");
        assert_eq!(state.form.vehicle_type, Some(VehicleType::Truck));
    }

    #[test]
    fn valid_file_replaces_prior_selection() {
        let reducer = FormReducer::default();
        let first = pick(&reducer, &UploadForm::default(), Some(png_candidate("a.png", 10)));
        let second = pick(&reducer, &first, Some(png_candidate("b.png", MAX_FILE_SIZE_BYTES)));

        let selected = second.selected_file.as_ref().unwrap();
        assert_eq!(selected.display_name, "b.png");
        assert_eq!(selected.size_bytes, MAX_FILE_SIZE_BYTES);
        assert!(second.file_alert.is_none());
        assert!(second.selection_id > first.selection_id);
    }

    #[test]
    fn invalid_file_clears_existing_selection_and_preview() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &UploadForm::default(), Some(png_candidate("car.png", 10)));
        let state = reducer.reduce(
            &state,
            FormEvent::PreviewDecoded {
                selection_id: state.selection_id,
                result: Ok(preview()),
            },
        );
        assert!(state.preview.is_some());

        let txt = CandidateFile::new(b"hello".to_vec(), "text/plain", "car.txt");
        let state = pick(&reducer, &state, Some(txt));
        assert!(state.selected_file.is_none());
        assert!(state.preview.is_none());
        assert_eq!(
            state.file_alert.as_deref(),
            Some("Invalid file type or size. Please upload PNG, JPG, jpeg, BMP, or GIF up to 6MB.")
        );
    }

    #[test]
    fn oversized_file_rejected() {
        let reducer = FormReducer::default();
        let state = pick(
            &reducer,
            &UploadForm::default(),
            Some(png_candidate("big.png", MAX_FILE_SIZE_BYTES + 1)),
        );
        assert!(state.selected_file.is_none());
        assert!(state.file_alert.is_some());
    }

    #[test]
    fn cancellation_clears_without_alert() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &UploadForm::default(), Some(png_candidate("car.png", 10)));
        let state = pick(&reducer, &state, None);
        assert!(state.selected_file.is_none());
        assert!(state.preview.is_none());
        assert!(state.file_alert.is_none());
    }

    #[test]
    fn drag_flags_and_drop_path() {
        let reducer = FormReducer::default();
        let state = reducer.reduce(&UploadForm::default(), FormEvent::DragEntered);
        assert!(state.dragging);
        let state = reducer.reduce(&state, FormEvent::DragLeft);
        assert!(!state.dragging);

        let state = reducer.reduce(&state, FormEvent::DragEntered);
        let state = reducer.reduce(&state, FormEvent::Dropped(Some(png_candidate("car.png", 10))));
        assert!(!state.dragging);
        assert_eq!(state.selected_file.unwrap().display_name, "car.png");
    }

    #[test]
    fn stale_preview_is_discarded() {
        let reducer = FormReducer::default();
        let first = pick(&reducer, &UploadForm::default(), Some(png_candidate("a.png", 10)));
        let stale_id = first.selection_id;
        let second = pick(&reducer, &first, Some(png_candidate("b.png", 10)));
        let state = reducer.reduce(
            &second,
            FormEvent::PreviewDecoded {
                selection_id: stale_id,
                result: Ok(preview()),
            },
        );
        assert!(state.preview.is_none());
    }

    #[test]
    fn undecodable_preview_clears_selection_by_default() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &UploadForm::default(), Some(png_candidate("a.png", 10)));
        let state = reducer.reduce(
            &state,
            FormEvent::PreviewDecoded {
                selection_id: state.selection_id,
                result: Err(ValidationError::Undecodable("bad".to_string())),
            },
        );
        assert!(state.selected_file.is_none());
        assert_eq!(
            state.file_alert.as_deref(),
            Some("The selected image could not be read.")
        );
    }

    #[test]
    fn undecodable_preview_keeps_selection_when_lenient() {
        let reducer = FormReducer::from_config(&FormConfig {
            reject_undecodable: false,
            ..FormConfig::default()
        });
        let state = pick(&reducer, &UploadForm::default(), Some(png_candidate("a.png", 10)));
        let state = reducer.reduce(
            &state,
            FormEvent::PreviewDecoded {
                selection_id: state.selection_id,
                result: Err(ValidationError::Undecodable("bad".to_string())),
            },
        );
        assert!(state.selected_file.is_some());
        assert!(state.preview.is_none());
        assert!(state.file_alert.is_none());
    }

    #[test]
    fn submit_without_file_fails_first_check() {
        let reducer = FormReducer::default();
        let state = reducer.reduce(&filled_form(), FormEvent::SubmitRequested);
        assert_eq!(
            state.result,
            SubmissionResult::Failure("Please select an image to upload.".to_string())
        );
    }

    #[test]
    fn submit_without_vehicle_type_fails_second_check() {
        let reducer = FormReducer::default();
        let mut state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        state.form.vehicle_type = None;
        let state = reducer.reduce(&state, FormEvent::SubmitRequested);
        assert_eq!(
            state.result,
            SubmissionResult::Failure("Please select a vehicle type.".to_string())
        );
    }

    #[test]
    fn file_check_runs_before_vehicle_type_check() {
        let reducer = FormReducer::default();
        let state = reducer.reduce(&UploadForm::default(), FormEvent::SubmitRequested);
        assert_eq!(
            state.result.error_message(),
            Some("Please select an image to upload.")
        );
    }

    #[test]
    fn submit_with_blank_text_field_fails() {
        let reducer = FormReducer::default();
        let mut state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        state.form.number.clear();
        let state = reducer.reduce(&state, FormEvent::SubmitRequested);
        assert_eq!(
            state.result.error_message(),
            Some("Please fill in the number field.")
        );
        assert!(!state.is_uploading());
    }

    #[test]
    fn submit_goes_in_flight_and_clears_previous_outcome() {
        let reducer = FormReducer::default();
        let mut state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        state.result = SubmissionResult::Failure("old".to_string());

        let state = reducer.reduce(&state, FormEvent::SubmitRequested);
        assert_eq!(state.result, SubmissionResult::InFlight);
        assert!(!state.can_submit());

        // A second submit while in flight changes nothing.
        let again = reducer.reduce(&state, FormEvent::SubmitRequested);
        assert_eq!(again, state);
    }

    #[test]
    fn finishing_ends_in_flight_on_both_paths() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        let in_flight = reducer.reduce(&state, FormEvent::SubmitRequested);

        let ok = reducer.reduce(
            &in_flight,
            FormEvent::SubmissionFinished(Ok(QuoteResponse::default())),
        );
        assert!(matches!(ok.result, SubmissionResult::Success(_)));
        assert!(!ok.is_uploading());

        let failed = reducer.reduce(
            &in_flight,
            FormEvent::SubmissionFinished(Err(SubmitError::Network("refused".to_string()))),
        );
        assert_eq!(
            failed.result,
            SubmissionResult::Failure("Error: No response received from server.".to_string())
        );
        assert!(!failed.is_uploading());
    }

    #[test]
    fn finish_without_submission_is_ignored() {
        let reducer = FormReducer::default();
        let state = reducer.reduce(
            &UploadForm::default(),
            FormEvent::SubmissionFinished(Ok(QuoteResponse::default())),
        );
        assert_eq!(state.result, SubmissionResult::NotStarted);
    }

    #[test]
    fn dismissing_alert_keeps_the_rest_of_the_form() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        let rejected = pick(
            &reducer,
            &state,
            Some(CandidateFile::new(b"x".to_vec(), "text/plain", "notes.txt")),
        );
        assert!(rejected.file_alert.is_some());

        let dismissed = reducer.reduce(&rejected, FormEvent::AlertDismissed);
        assert!(dismissed.file_alert.is_none());
        assert!(dismissed.selected_file.is_none());
        assert_eq!(dismissed.form, rejected.form);
        assert_eq!(dismissed.selection_id, rejected.selection_id);
    }

    #[test]
    fn preconditions_build_request() {
        let reducer = FormReducer::default();
        let state = pick(&reducer, &filled_form(), Some(png_candidate("car.png", 10)));
        let request = check_preconditions(&state.form, state.selected_file.as_ref()).unwrap();
        assert_eq!(request.vehicle_type, VehicleType::Suv);
        assert_eq!(request.file.display_name, "car.png");
    }
}
