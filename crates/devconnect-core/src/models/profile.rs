use serde::{Deserialize, Serialize};

/// Social links, merged key by key on profile upsert: a partial
/// update must not erase sibling links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub youtube: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub facebook: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub twitter: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub linkedin: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub instagram: Option<String>,
}

impl SocialLinks {
	/// Overlay `update` onto `self`, keeping existing keys unless the
	/// update explicitly carries a replacement.
	pub fn merge(&mut self, update: SocialLinks) {
		if update.youtube.is_some() {
			self.youtube = update.youtube;
		}
		if update.facebook.is_some() {
			self.facebook = update.facebook;
		}
		if update.twitter.is_some() {
			self.twitter = update.twitter;
		}
		if update.linkedin.is_some() {
			self.linkedin = update.linkedin;
		}
		if update.instagram.is_some() {
			self.instagram = update.instagram;
		}
	}

	pub fn is_empty(&self) -> bool {
		self.youtube.is_none()
			&& self.facebook.is_none()
			&& self.twitter.is_none()
			&& self.linkedin.is_none()
			&& self.instagram.is_none()
	}
}

/// One job held, newest first in `Profile::experience`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
	pub id: String,
	pub title: String,
	pub company: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	pub from: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(default)]
	pub current: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// One school attended, newest first in `Profile::education`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
	pub id: String,
	pub school: String,
	pub degree: String,
	pub fieldofstudy: String,
	pub from: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(default)]
	pub current: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// `{name, avatar}` projection of the owning user, attached when
/// listing all profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOwner {
	pub name: String,
	pub avatar: String,
}

/// Per-user profile aggregate: scalar fields plus the ordered
/// experience and education sub-collections, mutated as a unit.
///
/// Unset optional fields are omitted from JSON output, never `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
	pub id: String,
	/// Owning user id; one profile per user.
	pub user: String,
	pub status: String,
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
	pub skills: Vec<String>,
	#[serde(skip_serializing_if = "SocialLinks::is_empty", default)]
	pub social: SocialLinks,
	pub experience: Vec<ExperienceEntry>,
	pub education: Vec<EducationEntry>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub owner: Option<ProfileOwner>,
}
