use profile_service_core::profiles::{Profile, ProfileChanges, ProfileRepositoryTrait};
use profile_service_core::Result;

use super::model::{NewProfileDB, ProfileChangesetDB, ProfileDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::profiles;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;

use std::sync::Arc;

pub struct ProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProfileRepository { pool, writer }
    }

    fn find(conn: &mut SqliteConnection, user_id: &str) -> Result<Option<ProfileDB>> {
        profiles::table
            .find(user_id)
            .select(ProfileDB::as_select())
            .first::<ProfileDB>(conn)
            .optional()
            .into_core()
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(Self::find(&mut conn, user_id)?.map(Profile::from))
    }

    async fn upsert(&self, changes: ProfileChanges, user_id: String) -> Result<Profile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Profile> {
                let now = Utc::now().naive_utc();

                let row = match Self::find(conn, &user_id)? {
                    None => {
                        let new_profile = changes.into_new_profile(user_id)?;
                        debug!("Creating profile {}", new_profile.user_id);
                        diesel::insert_into(profiles::table)
                            .values(&NewProfileDB::from_domain(new_profile, now))
                            .returning(ProfileDB::as_returning())
                            .get_result(conn)
                            .into_core()?
                    }
                    Some(_) => {
                        debug!("Updating profile {}", user_id);
                        diesel::update(profiles::table.find(user_id.as_str()))
                            .set(&ProfileChangesetDB::from_domain(changes, now))
                            .returning(ProfileDB::as_returning())
                            .get_result(conn)
                            .into_core()?
                    }
                };

                Ok(Profile::from(row))
            })
            .await
    }
}
