mod form_params;
mod form_submission;

pub use form_params::FormParams;
pub use form_submission::FormSubmission;
