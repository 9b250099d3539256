//! Error taxonomy shared by the stores and the HTTP layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every fault a handler can surface, one variant per wire class.
///
/// The HTTP layer maps these onto status codes and body shapes;
/// nothing below it needs to know about HTTP.
#[derive(Debug, Error)]
pub enum Error {
	/// Malformed or missing input, one message per failing field.
	#[error("validation failed")]
	Validation(Vec<String>),

	/// Login rejection. Unknown email and wrong password share this
	/// variant so the two cases are indistinguishable to callers.
	#[error("Invalid Credentials")]
	InvalidCredentials,

	/// Missing, malformed, or expired token.
	#[error("{0}")]
	Unauthorized(String),

	/// Authenticated but not entitled to the target resource.
	#[error("{0}")]
	Forbidden(String),

	/// Referenced entity absent.
	#[error("{0}")]
	NotFound(String),

	/// Duplicate email, double like, and similar state conflicts.
	#[error("{0}")]
	Conflict(String),

	#[error(transparent)]
	Database(#[from] sqlx::Error),

	/// Unexpected fault; never exposes internals past a generic string.
	#[error("{0}")]
	Internal(String),
}

impl From<validator::ValidationErrors> for Error {
	fn from(errors: validator::ValidationErrors) -> Self {
		let messages = errors
			.field_errors()
			.into_iter()
			.flat_map(|(field, errs)| {
				errs.iter()
					.map(move |e| match &e.message {
						Some(message) => message.to_string(),
						None => format!("{} is invalid", field),
					})
					.collect::<Vec<_>>()
			})
			.collect();
		Error::Validation(messages)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use validator::Validate;

	#[derive(Validate)]
	struct Payload {
		#[validate(length(min = 1, message = "Text is required"))]
		text: String,
	}

	#[test]
	fn validation_errors_keep_field_messages() {
		let err = Payload {
			text: String::new(),
		}
		.validate()
		.unwrap_err();

		match Error::from(err) {
			Error::Validation(messages) => {
				assert_eq!(messages, vec!["Text is required".to_string()]);
			}
			other => panic!("expected validation error, got {other:?}"),
		}
	}
}
