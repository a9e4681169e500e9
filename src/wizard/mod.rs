// ABOUTME: Loan application wizard core: step sequencing, per-step forms and validation
// Rendering lives in components; this module has no terminal dependencies

pub mod choice;
pub mod form;
pub mod payload;
pub mod sequencer;
pub mod sink;
pub mod step;
pub mod validation;

pub use choice::ChoiceInput;
pub use form::{FieldInput, FormFocus, StepForm, SubmitOutcome};
pub use payload::{BorrowerInfo, City, DirectorInfo, DocumentInfo, FinancialInfo, PropertyType, StepPayload};
pub use sequencer::{StepDefinition, StepMarker, StepNavigator, StepSequencer};
pub use sink::{CompletionSink, JsonlSink, SinkChain, SubmissionRecord, TracingSink};
pub use step::{ChoiceOption, FieldId, FieldKind, FieldSpec, StepKind};
pub use validation::{Check, FieldError, FieldRule, FormValues, Schema, ValidationErrors};
