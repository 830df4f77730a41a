use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use nxfi_types::ActionError;
use nxlend_sdk::NxlendError;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a supply POST, rendered as an Actions error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no registry entry for `{0}`")]
    TokenNotFound(String),
    #[error("unreadable request body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Nxlend(#[from] NxlendError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TokenNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Nxlend(NxlendError::InvalidAccount(_) | NxlendError::InvalidAmount(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Nxlend(NxlendError::InvalidTokenMetadata { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Nxlend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message returned to the client. Internal causes are only logged.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::TokenNotFound(_) => "Token metadata not found.",
            Self::InvalidBody(_) | Self::Nxlend(NxlendError::InvalidAccount(_)) => {
                "Invalid account provided."
            }
            Self::Nxlend(NxlendError::InvalidAmount(_)) => "Invalid amount provided.",
            Self::Nxlend(NxlendError::InvalidTokenMetadata { .. }) => "Token metadata is invalid.",
            Self::Nxlend(_) => "Failed to build transaction.",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Supply request failed: {}", self);
        } else {
            warn!("Supply request rejected: {}", self);
        }
        (status, Json(ActionError::new(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn caller_mistakes_are_client_errors() {
        let cases = [
            (ApiError::TokenNotFound("foo".into()), 422),
            (ApiError::InvalidBody("missing field `account`".into()), 400),
            (NxlendError::InvalidAccount("x".into()).into(), 400),
            (NxlendError::InvalidAmount("-1".into()).into(), 400),
            (
                NxlendError::InvalidTokenMetadata {
                    field: "tokenMint",
                    value: "?".into(),
                }
                .into(),
                422,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status().as_u16(), status, "{err}");
        }
    }

    #[test]
    fn network_failures_hide_their_cause() {
        let err: ApiError = NxlendError::LookupTableNotFound(Pubkey::new_unique()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to build transaction.");

        let err: ApiError = NxlendError::Rpc("connection refused".into()).into();
        assert_eq!(err.public_message(), "Failed to build transaction.");
    }
}
