//! User data model.
//!
//! A user is a schemaless document with two addressable fields: an opaque
//! identifier assigned by the store and an email used as the uniqueness key
//! on creation. Everything else travels as an attribute bag.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Free-form document fields stored alongside the identifier and email.
pub type UserAttributes = Map<String, Value>;

const RESERVED_KEYS: [&str; 2] = ["id", "email"];

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    ReservedAttribute { key: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not have surrounding whitespace"),
            Self::ReservedAttribute { key } => {
                write!(f, "attribute `{key}` is reserved for the user document")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Opaque store-assigned user identifier.
///
/// Adapters generate UUID strings, but callers may address records with any
/// non-empty identifier, so no format is imposed beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use userapp::domain::UserId;
    ///
    /// let id = UserId::new("64f1c2").expect("valid id");
    /// assert_eq!(id.as_ref(), "64f1c2");
    /// assert!(UserId::new("").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier for a new document.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used as the creation-time uniqueness key.
///
/// Any string is accepted. Stored and compared byte-for-byte: no case
/// folding, no trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl From<String> for EmailAddress {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// User document.
///
/// ## Invariants
/// - `id` is `None` until the store has saved the document once.
/// - `attributes` never contains the reserved `id` or `email` keys.
///
/// The JSON form flattens the attributes next to `id` and `email`:
///
/// ```
/// use userapp::domain::User;
///
/// let user: User = serde_json::from_str(r#"{"email":"a@x.com","name":"Ada"}"#)
///     .expect("valid user");
/// assert!(user.id().is_none());
/// assert_eq!(user.email().as_ref(), "a@x.com");
/// assert_eq!(user.attributes()["name"], "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: Option<UserId>,
    email: EmailAddress,
    attributes: UserAttributes,
}

impl User {
    /// Build an unsaved user with no extra attributes.
    pub fn new(email: EmailAddress) -> Self {
        Self {
            id: None,
            email,
            attributes: UserAttributes::new(),
        }
    }

    /// Build an unsaved user from a raw email string.
    pub fn from_email(email: impl Into<String>) -> Self {
        Self::new(EmailAddress::new(email))
    }

    /// Replace the attribute bag, rejecting reserved keys.
    pub fn with_attributes(
        mut self,
        attributes: UserAttributes,
    ) -> Result<Self, UserValidationError> {
        if let Some(key) = attributes
            .keys()
            .find(|key| RESERVED_KEYS.contains(&key.as_str()))
        {
            return Err(UserValidationError::ReservedAttribute { key: key.clone() });
        }
        self.attributes = attributes;
        Ok(self)
    }

    /// Return the user carrying `id`, discarding any previous identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrite the identifier in place.
    pub fn assign_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    /// Store-assigned identifier, absent before the first save.
    pub fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    /// Email used for the creation uniqueness check.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Free-form document fields.
    pub fn attributes(&self) -> &UserAttributes {
        &self.attributes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    email: String,
    #[serde(flatten)]
    attributes: UserAttributes,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            attributes,
        } = value;
        Self {
            id: id.map(String::from),
            email: email.into(),
            attributes,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let UserDto {
            id,
            email,
            attributes,
        } = value;
        let user = User::from_email(email).with_attributes(attributes)?;
        // An empty id marks a document that has not been saved yet.
        match id.filter(|id| !id.is_empty()) {
            Some(id) => Ok(user.with_id(UserId::new(id)?)),
            None => Ok(user),
        }
    }
}

#[cfg(test)]
mod tests;
