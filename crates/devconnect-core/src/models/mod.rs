//! Data model: aggregates, their nested sub-documents, and the
//! validated input payloads the API accepts.

pub mod inputs;
mod post;
mod profile;
mod user;

pub use post::{Comment, Like, Post};
pub use profile::{EducationEntry, ExperienceEntry, Profile, ProfileOwner, SocialLinks};
pub use user::User;
