// ABOUTME: UI components for the wizard: progress track, step form, dropdown popup and layout

pub mod choice_popup;
pub mod layout;
pub mod step_form;
pub mod stepper;

pub use choice_popup::ChoicePopupComponent;
pub use layout::LayoutComponent;
pub use step_form::StepFormComponent;
pub use stepper::StepperComponent;
