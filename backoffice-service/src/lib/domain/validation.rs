//! Parsing and structural validation of inbound request bodies.
//!
//! Every request kind is a distinct shape with its own constraint table:
//!
//! | Kind           | Field                         | Constraint          |
//! |----------------|-------------------------------|---------------------|
//! | Login          | username                      | 1..=225 chars       |
//! | Login          | password                      | at least 1 char     |
//! | Register       | first_name, last_name         | 1..=50 chars        |
//! | Register       | email                         | 1..=225 chars       |
//! | Register       | password, confirm_password    | at least 1 char     |
//! | ChangePassword | password, confirm_password    | at least 1 char     |
//! | ChangeEmail    | email, confirm_email          | 1..=225 chars       |
//! | UpdateUserInfo | first_name, last_name         | 1..=50 chars        |
//!
//! Cross-field rules (confirmation matches) belong to the calling service.

use std::borrow::Cow;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

/// Kinds of request body the validator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    Register,
    ChangePassword,
    ChangeEmail,
    UpdateUserInfo,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::Login => "login request",
            RequestKind::Register => "registration request",
            RequestKind::ChangePassword => "change password request",
            RequestKind::ChangeEmail => "change email request",
            RequestKind::UpdateUserInfo => "update info request",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unable to parse {kind}: {reason}")]
    Malformed { kind: RequestKind, reason: String },

    #[error("Invalid {kind}: {reason}")]
    ConstraintViolated { kind: RequestKind, reason: String },
}

/// A request shape bound to its [`RequestKind`].
pub trait ValidatedRequest: DeserializeOwned + Validate {
    const KIND: RequestKind;

    /// Take this shape back out of a dispatched parse, if the variant matches.
    fn from_parsed(parsed: ParsedRequest) -> Option<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 225))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl ValidatedRequest for LoginRequest {
    const KIND: RequestKind = RequestKind::Login;

    fn from_parsed(parsed: ParsedRequest) -> Option<Self> {
        match parsed {
            ParsedRequest::Login(request) => Some(request),
            _ => None,
        }
    }
}

/// Self-registration body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[validate(length(min = 1, max = 225))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    #[validate(length(min = 1))]
    pub confirm_password: String,
}

impl ValidatedRequest for RegisterRequest {
    const KIND: RequestKind = RequestKind::Register;

    fn from_parsed(parsed: ParsedRequest) -> Option<Self> {
        match parsed {
            ParsedRequest::Register(request) => Some(request),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub password: String,

    #[validate(length(min = 1))]
    pub confirm_password: String,
}

impl ValidatedRequest for ChangePasswordRequest {
    const KIND: RequestKind = RequestKind::ChangePassword;

    fn from_parsed(parsed: ParsedRequest) -> Option<Self> {
        match parsed {
            ParsedRequest::ChangePassword(request) => Some(request),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    #[validate(length(min = 1, max = 225))]
    pub email: String,

    #[validate(length(min = 1, max = 225))]
    pub confirm_email: String,
}

impl ValidatedRequest for ChangeEmailRequest {
    const KIND: RequestKind = RequestKind::ChangeEmail;

    fn from_parsed(parsed: ParsedRequest) -> Option<Self> {
        match parsed {
            ParsedRequest::ChangeEmail(request) => Some(request),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateUserInfoRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
}

impl ValidatedRequest for UpdateUserInfoRequest {
    const KIND: RequestKind = RequestKind::UpdateUserInfo;

    fn from_parsed(parsed: ParsedRequest) -> Option<Self> {
        match parsed {
            ParsedRequest::UpdateUserInfo(request) => Some(request),
            _ => None,
        }
    }
}

/// Result of [`CredentialValidator::parse_and_validate`], one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRequest {
    Login(LoginRequest),
    Register(RegisterRequest),
    ChangePassword(ChangePasswordRequest),
    ChangeEmail(ChangeEmailRequest),
    UpdateUserInfo(UpdateUserInfoRequest),
}

impl ParsedRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ParsedRequest::Login(_) => RequestKind::Login,
            ParsedRequest::Register(_) => RequestKind::Register,
            ParsedRequest::ChangePassword(_) => RequestKind::ChangePassword,
            ParsedRequest::ChangeEmail(_) => RequestKind::ChangeEmail,
            ParsedRequest::UpdateUserInfo(_) => RequestKind::UpdateUserInfo,
        }
    }
}

/// Parses raw request bodies into validated request shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a body as the shape selected by `kind`.
    ///
    /// The body is normalized to compact JSON first; if that fails the
    /// original bytes are parsed as-is.
    ///
    /// # Errors
    /// * `Malformed` - Body is not JSON of the expected shape
    /// * `ConstraintViolated` - A field breaks its constraint
    pub fn parse_and_validate(
        &self,
        body: &[u8],
        kind: RequestKind,
    ) -> Result<ParsedRequest, ValidationError> {
        match kind {
            RequestKind::Login => decode(body).map(ParsedRequest::Login),
            RequestKind::Register => decode(body).map(ParsedRequest::Register),
            RequestKind::ChangePassword => decode(body).map(ParsedRequest::ChangePassword),
            RequestKind::ChangeEmail => decode(body).map(ParsedRequest::ChangeEmail),
            RequestKind::UpdateUserInfo => decode(body).map(ParsedRequest::UpdateUserInfo),
        }
    }

    /// Typed form of [`parse_and_validate`](Self::parse_and_validate),
    /// dispatching on `T::KIND`.
    ///
    /// # Errors
    /// * `Malformed` - Body is not JSON of the expected shape
    /// * `ConstraintViolated` - A field breaks its constraint
    pub fn parse<T: ValidatedRequest>(&self, body: &[u8]) -> Result<T, ValidationError> {
        let parsed = self.parse_and_validate(body, T::KIND)?;
        let kind = parsed.kind();

        T::from_parsed(parsed).ok_or_else(|| ValidationError::Malformed {
            kind: T::KIND,
            reason: format!("parsed as {}", kind),
        })
    }
}

fn decode<T: ValidatedRequest>(body: &[u8]) -> Result<T, ValidationError> {
    let body = normalize(body);

    let request: T = serde_json::from_slice(&body).map_err(|e| {
        tracing::info!(kind = %T::KIND, error = %e, "Unable to parse request body");
        ValidationError::Malformed {
            kind: T::KIND,
            reason: e.to_string(),
        }
    })?;

    request.validate().map_err(|e| {
        tracing::info!(kind = %T::KIND, error = %e, "Request body failed validation");
        ValidationError::ConstraintViolated {
            kind: T::KIND,
            reason: e.to_string(),
        }
    })?;

    Ok(request)
}

fn normalize(body: &[u8]) -> Cow<'_, [u8]> {
    serde_json::from_slice::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_vec(&value))
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed(body))
}
