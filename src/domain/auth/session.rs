//! Authenticated session entity.
//!
//! A session is immutable once issued: refreshing or re-authenticating
//! always produces a new `AuthSession` that replaces the old one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{Email, Timestamp, UserId, ValidationError};

/// Access grant issued by the auth backend (or the offline fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    user_id: UserId,
    email: Email,
    token: String,
    refresh_token: String,
    expires_at: Timestamp,
    created_at: Timestamp,
}

impl AuthSession {
    /// Creates a session issued now.
    pub fn new(
        user_id: UserId,
        email: Email,
        token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: Timestamp,
    ) -> Self {
        Self::reconstitute(
            user_id,
            email,
            token.into(),
            refresh_token.into(),
            expires_at,
            Timestamp::now(),
        )
    }

    /// Reconstitute a session with an explicit creation time.
    pub fn reconstitute(
        user_id: UserId,
        email: Email,
        token: String,
        refresh_token: String,
        expires_at: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            email,
            token,
            refresh_token,
            expires_at,
            created_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// True from `expires_at` onwards.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    /// Not expired at `now` and carrying a non-empty token.
    pub fn is_valid_at(&self, now: &Timestamp) -> bool {
        !self.is_expired_at(now) && !self.token.is_empty()
    }

    /// Expiry check against the wall clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }

    /// Validity check against the wall clock.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(&Timestamp::now())
    }

    /// Converts to the plain persisted shape.
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            user_id: self.user_id.to_string(),
            email: self.email.to_string(),
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at.to_rfc3339(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Plain, serializable shape of a session as stored on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_id: String,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
    pub expires_at: String,
    pub created_at: String,
}

/// Reasons a persisted session record cannot be turned back into a session.
#[derive(Debug, Clone, Error)]
pub enum SessionRecordError {
    #[error("invalid session field: {0}")]
    InvalidField(#[from] ValidationError),

    #[error("invalid session timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl TryFrom<SessionRecord> for AuthSession {
    type Error = SessionRecordError;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let parse = |value: &str| {
            Timestamp::parse_rfc3339(value).map_err(|e| SessionRecordError::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(AuthSession::reconstitute(
            UserId::new(&record.user_id)?,
            Email::new(&record.email)?,
            record.token,
            record.refresh_token,
            parse(&record.expires_at)?,
            parse(&record.created_at)?,
        ))
    }
}
