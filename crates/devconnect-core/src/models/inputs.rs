//! Validated request payloads.
//!
//! Required string fields default to empty on deserialization so a
//! missing field reports its validation message instead of a bare
//! JSON decode error.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SocialLinks;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Name is required"))]
	pub name: String,
	#[serde(default)]
	#[validate(email(message = "Please include a valid email"))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 6, message = "Please enter a password with 6 or more characters"))]
	pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
	#[serde(default)]
	#[validate(email(message = "Please include a valid email"))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Password is required"))]
	pub password: String,
}

/// Profile upsert payload.
///
/// `skills` arrives as a single comma-delimited string; scalar
/// options left out of the payload keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Status is required"))]
	pub status: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Skills is required"))]
	pub skills: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub website: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub githubusername: Option<String>,
	#[serde(default, skip_serializing_if = "SocialLinks::is_empty")]
	pub social: SocialLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ExperienceInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Title is required"))]
	pub title: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Company is required"))]
	pub company: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(default)]
	#[validate(length(min = 1, message = "From date is required"))]
	pub from: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(default)]
	pub current: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EducationInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "School is required"))]
	pub school: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Degree is required"))]
	pub degree: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "Field of study is required"))]
	pub fieldofstudy: String,
	#[serde(default)]
	#[validate(length(min = 1, message = "From date is required"))]
	pub from: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(default)]
	pub current: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Text is required"))]
	pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentInput {
	#[serde(default)]
	#[validate(length(min = 1, message = "Text is required"))]
	pub text: String,
}
