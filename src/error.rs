use thiserror::Error;

use crate::renderer::TemplateKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// No template root or group configuration could be located.
    #[error("Configuration not found: {0}.")]
    ConfigNotFound(String),

    #[error("Failed to parse configuration '{path}'. Original error: {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Template '{template}' is not declared in group '{group}'.")]
    TemplateNotFound { group: String, template: String },

    #[error("Unsupported template type: '{file}'.")]
    UnsupportedTemplateKind { file: String },

    /// The backend rejected the template or the context it was given.
    #[error("Failed to render {kind} template. Original error: {message}")]
    RenderError { kind: TemplateKind, message: String },

    #[error("Invalid input: {0}.")]
    InvalidInput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

/// Convenience type alias for Results with codesmith's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
