use daybook_core::FieldErrors;

/// What the user sees when the failure is not something they can fix.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered and refused the request with a message meant for
    /// the user.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        fields: Option<FieldErrors>,
    },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Message for the form's root error slot.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Rejected { fields, .. } => fields.as_ref(),
            _ => None,
        }
    }
}
