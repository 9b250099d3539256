//! Profile aggregate: upsert with nested social merge, plus the
//! ordered experience and education sub-collections.

use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::inputs::{EducationInput, ExperienceInput, ProfileInput};
use crate::models::{EducationEntry, ExperienceEntry, Profile, ProfileOwner, SocialLinks};
use crate::{Error, Result};

/// Row image of a profile; sub-collections live in JSON columns so
/// the aggregate reads and writes as one document.
#[derive(FromRow)]
struct ProfileRow {
	id: String,
	user_id: String,
	status: String,
	company: Option<String>,
	website: Option<String>,
	location: Option<String>,
	bio: Option<String>,
	githubusername: Option<String>,
	skills: Json<Vec<String>>,
	social: Json<SocialLinks>,
	experience: Json<Vec<ExperienceEntry>>,
	education: Json<Vec<EducationEntry>>,
}

impl From<ProfileRow> for Profile {
	fn from(row: ProfileRow) -> Self {
		Profile {
			id: row.id,
			user: row.user_id,
			status: row.status,
			company: row.company,
			website: row.website,
			location: row.location,
			bio: row.bio,
			githubusername: row.githubusername,
			skills: row.skills.0,
			social: row.social.0,
			experience: row.experience.0,
			education: row.education.0,
			owner: None,
		}
	}
}

#[derive(Clone)]
pub struct ProfileStore {
	pool: SqlitePool,
}

impl ProfileStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Split the comma-delimited skills string, trimming each segment.
	///
	/// Empty segments survive: `"a,,b"` keeps its hole and a trailing
	/// comma leaves an empty entry. Reference behavior, preserved
	/// deliberately.
	pub fn split_skills(raw: &str) -> Vec<String> {
		raw.split(',').map(|s| s.trim().to_owned()).collect()
	}

	/// Create the caller's profile, or merge into the existing one.
	///
	/// Scalar fields are fully replaced when present in the input and
	/// kept otherwise; `social` is merged key by key, so a partial
	/// social update never erases sibling links.
	pub async fn upsert(&self, user_id: &str, input: ProfileInput) -> Result<Profile> {
		let skills = Self::split_skills(&input.skills);

		match self.row_for(user_id).await? {
			Some(mut row) => {
				row.status = input.status;
				row.skills = Json(skills);
				if input.company.is_some() {
					row.company = input.company;
				}
				if input.website.is_some() {
					row.website = input.website;
				}
				if input.location.is_some() {
					row.location = input.location;
				}
				if input.bio.is_some() {
					row.bio = input.bio;
				}
				if input.githubusername.is_some() {
					row.githubusername = input.githubusername;
				}
				row.social.0.merge(input.social);

				self.save(&row).await?;
				Ok(row.into())
			}
			None => {
				let row = ProfileRow {
					id: Uuid::new_v4().to_string(),
					user_id: user_id.to_owned(),
					status: input.status,
					company: input.company,
					website: input.website,
					location: input.location,
					bio: input.bio,
					githubusername: input.githubusername,
					skills: Json(skills),
					social: Json(input.social),
					experience: Json(Vec::new()),
					education: Json(Vec::new()),
				};

				sqlx::query(
					"INSERT INTO profiles (id, user_id, status, company, website, location, \
					 bio, githubusername, skills, social, experience, education) \
					 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
				)
				.bind(&row.id)
				.bind(&row.user_id)
				.bind(&row.status)
				.bind(&row.company)
				.bind(&row.website)
				.bind(&row.location)
				.bind(&row.bio)
				.bind(&row.githubusername)
				.bind(&row.skills)
				.bind(&row.social)
				.bind(&row.experience)
				.bind(&row.education)
				.execute(&self.pool)
				.await?;

				Ok(row.into())
			}
		}
	}

	pub async fn get(&self, user_id: &str) -> Result<Profile> {
		self.require_row(user_id).await.map(Into::into)
	}

	/// All profiles, each with its owning user projected to
	/// `{name, avatar}`.
	pub async fn list(&self) -> Result<Vec<Profile>> {
		#[derive(FromRow)]
		struct ListRow {
			#[sqlx(flatten)]
			profile: ProfileRow,
			owner_name: String,
			owner_avatar: String,
		}

		let rows = sqlx::query_as::<_, ListRow>(
			"SELECT p.*, u.name AS owner_name, u.avatar AS owner_avatar \
			 FROM profiles p JOIN users u ON u.id = p.user_id",
		)
		.fetch_all(&self.pool)
		.await?;

		Ok(rows
			.into_iter()
			.map(|row| {
				let mut profile: Profile = row.profile.into();
				profile.owner = Some(ProfileOwner {
					name: row.owner_name,
					avatar: row.owner_avatar,
				});
				profile
			})
			.collect())
	}

	/// Prepend an experience entry with a fresh sub-id.
	pub async fn add_experience(&self, user_id: &str, input: ExperienceInput) -> Result<Profile> {
		let mut row = self.require_row(user_id).await?;
		row.experience.0.insert(
			0,
			ExperienceEntry {
				id: Uuid::new_v4().to_string(),
				title: input.title,
				company: input.company,
				location: input.location,
				from: input.from,
				to: input.to,
				current: input.current,
				description: input.description,
			},
		);
		self.save(&row).await?;
		Ok(row.into())
	}

	/// Drop the experience entry with `entry_id`; an absent id is a
	/// silent no-op, not an error.
	pub async fn remove_experience(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
		let mut row = self.require_row(user_id).await?;
		row.experience.0.retain(|entry| entry.id != entry_id);
		self.save(&row).await?;
		Ok(row.into())
	}

	/// Prepend an education entry with a fresh sub-id.
	pub async fn add_education(&self, user_id: &str, input: EducationInput) -> Result<Profile> {
		let mut row = self.require_row(user_id).await?;
		row.education.0.insert(
			0,
			EducationEntry {
				id: Uuid::new_v4().to_string(),
				school: input.school,
				degree: input.degree,
				fieldofstudy: input.fieldofstudy,
				from: input.from,
				to: input.to,
				current: input.current,
				description: input.description,
			},
		);
		self.save(&row).await?;
		Ok(row.into())
	}

	/// Drop the education entry with `entry_id`; absent ids are a
	/// silent no-op.
	pub async fn remove_education(&self, user_id: &str, entry_id: &str) -> Result<Profile> {
		let mut row = self.require_row(user_id).await?;
		row.education.0.retain(|entry| entry.id != entry_id);
		self.save(&row).await?;
		Ok(row.into())
	}

	async fn row_for(&self, user_id: &str) -> Result<Option<ProfileRow>> {
		Ok(
			sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = ?")
				.bind(user_id)
				.fetch_optional(&self.pool)
				.await?,
		)
	}

	async fn require_row(&self, user_id: &str) -> Result<ProfileRow> {
		self.row_for(user_id)
			.await?
			.ok_or_else(|| Error::NotFound("There is no profile for this user".to_string()))
	}

	async fn save(&self, row: &ProfileRow) -> Result<()> {
		sqlx::query(
			"UPDATE profiles SET status = ?, company = ?, website = ?, location = ?, \
			 bio = ?, githubusername = ?, skills = ?, social = ?, experience = ?, \
			 education = ? WHERE id = ?",
		)
		.bind(&row.status)
		.bind(&row.company)
		.bind(&row.website)
		.bind(&row.location)
		.bind(&row.bio)
		.bind(&row.githubusername)
		.bind(&row.skills)
		.bind(&row.social)
		.bind(&row.experience)
		.bind(&row.education)
		.bind(&row.id)
		.execute(&self.pool)
		.await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::hasher::Argon2Hasher;
	use crate::store::testing::memory_pool;
	use crate::store::UserStore;
	use std::sync::Arc;

	fn base_input() -> ProfileInput {
		ProfileInput {
			status: "Developer".to_string(),
			skills: "Rust, SQL".to_string(),
			..ProfileInput::default()
		}
	}

	async fn store() -> ProfileStore {
		ProfileStore::new(memory_pool().await)
	}

	#[test]
	fn skills_split_trims_but_keeps_empty_segments() {
		assert_eq!(
			ProfileStore::split_skills(" Rust , SQL ,,tokio,"),
			vec!["Rust", "SQL", "", "tokio", ""]
		);
	}

	#[tokio::test]
	async fn upsert_creates_then_merges() {
		let store = store().await;

		let created = store.upsert("u1", base_input()).await.unwrap();
		assert_eq!(created.user, "u1");
		assert_eq!(created.skills, vec!["Rust", "SQL"]);
		assert!(created.company.is_none());

		let mut update = base_input();
		update.company = Some("ACME".to_string());
		let merged = store.upsert("u1", update).await.unwrap();

		assert_eq!(merged.id, created.id);
		assert_eq!(merged.company.as_deref(), Some("ACME"));

		// A later update without `company` keeps the stored value.
		let unchanged = store.upsert("u1", base_input()).await.unwrap();
		assert_eq!(unchanged.company.as_deref(), Some("ACME"));
	}

	#[tokio::test]
	async fn partial_social_update_keeps_siblings() {
		let store = store().await;

		let mut first = base_input();
		first.social.youtube = Some("y".to_string());
		store.upsert("u1", first).await.unwrap();

		let mut second = base_input();
		second.social.twitter = Some("x".to_string());
		let profile = store.upsert("u1", second).await.unwrap();

		assert_eq!(profile.social.youtube.as_deref(), Some("y"));
		assert_eq!(profile.social.twitter.as_deref(), Some("x"));
	}

	#[tokio::test]
	async fn experience_add_then_remove_restores_prior_state() {
		let store = store().await;
		store.upsert("u1", base_input()).await.unwrap();

		let seeded = store
			.add_experience(
				"u1",
				ExperienceInput {
					title: "Engineer".to_string(),
					company: "First".to_string(),
					from: "2020-01-01".to_string(),
					..ExperienceInput::default()
				},
			)
			.await
			.unwrap();
		let prior: Vec<String> = seeded.experience.iter().map(|e| e.id.clone()).collect();

		let with_new = store
			.add_experience(
				"u1",
				ExperienceInput {
					title: "Lead".to_string(),
					company: "Second".to_string(),
					from: "2022-01-01".to_string(),
					..ExperienceInput::default()
				},
			)
			.await
			.unwrap();
		// Prepended: the fresh entry sits first.
		assert_eq!(with_new.experience.len(), 2);
		assert_eq!(with_new.experience[0].title, "Lead");

		let restored = store
			.remove_experience("u1", &with_new.experience[0].id)
			.await
			.unwrap();
		let after: Vec<String> = restored.experience.iter().map(|e| e.id.clone()).collect();
		assert_eq!(after, prior);
	}

	#[tokio::test]
	async fn removing_unknown_entry_is_a_no_op() {
		let store = store().await;
		store.upsert("u1", base_input()).await.unwrap();

		let profile = store.remove_experience("u1", "no-such-id").await.unwrap();
		assert!(profile.experience.is_empty());
	}

	#[tokio::test]
	async fn adding_experience_without_profile_is_not_found() {
		let store = store().await;
		let result = store
			.add_experience("u1", ExperienceInput::default())
			.await;
		assert!(matches!(result, Err(Error::NotFound(_))));
	}

	#[tokio::test]
	async fn education_follows_the_same_contract() {
		let store = store().await;
		store.upsert("u1", base_input()).await.unwrap();

		let profile = store
			.add_education(
				"u1",
				EducationInput {
					school: "State".to_string(),
					degree: "BSc".to_string(),
					fieldofstudy: "CS".to_string(),
					from: "2016-09-01".to_string(),
					..EducationInput::default()
				},
			)
			.await
			.unwrap();
		assert_eq!(profile.education.len(), 1);

		let cleared = store
			.remove_education("u1", &profile.education[0].id)
			.await
			.unwrap();
		assert!(cleared.education.is_empty());
	}

	#[tokio::test]
	async fn list_projects_owner_name_and_avatar() {
		let pool = memory_pool().await;
		let users = UserStore::new(pool.clone(), Arc::new(Argon2Hasher::new()));
		let profiles = ProfileStore::new(pool);

		let user = users
			.register("Dev", "dev@example.com", "hunter22")
			.await
			.unwrap();
		profiles.upsert(&user.id, base_input()).await.unwrap();

		let listed = profiles.list().await.unwrap();
		assert_eq!(listed.len(), 1);
		let owner = listed[0].owner.as_ref().unwrap();
		assert_eq!(owner.name, "Dev");
		assert_eq!(owner.avatar, user.avatar);
	}

	#[tokio::test]
	async fn get_without_profile_is_not_found() {
		let store = store().await;
		assert!(matches!(store.get("u1").await, Err(Error::NotFound(_))));
	}
}
