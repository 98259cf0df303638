use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("No restaurant selected")]
    NoRestaurant,

    #[error("Please order from one restaurant at a time")]
    MultiRestaurant(Vec<String>),

    #[error("Please select a delivery address")]
    MissingLocation,

    #[error("Enter phone and provider")]
    MissingMobileDetails,

    #[error("Enter an amount to deposit")]
    InvalidDepositAmount,

    #[error("You must be logged in")]
    Unauthenticated,

    #[error("Forbidden")]
    Forbidden,

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// Non-2xx answer from the backend. `message` is the raw response body.
    #[error("{message}")]
    OrderSubmission { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Local checks that fail before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyCart
                | AppError::NoRestaurant
                | AppError::MultiRestaurant(_)
                | AppError::MissingLocation
                | AppError::MissingMobileDetails
                | AppError::InvalidDepositAmount
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_surfaced_verbatim() {
        let err = AppError::OrderSubmission {
            status: 400,
            message: "{\"detail\":\"Restaurant closed\"}".into(),
        };
        assert_eq!(err.to_string(), "{\"detail\":\"Restaurant closed\"}");
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_errors_have_distinct_messages() {
        let errors = [
            AppError::EmptyCart,
            AppError::NoRestaurant,
            AppError::MultiRestaurant(vec!["a".into(), "b".into()]),
            AppError::MissingLocation,
            AppError::MissingMobileDetails,
        ];
        let mut messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert!(errors.iter().all(AppError::is_validation));
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }
}
