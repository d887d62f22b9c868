use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserDto,
    server::{
        cache::{keys, Cache},
        data::user::{membership::MembershipRepository, user::UserRepository},
        error::Error,
        live::LiveApiClient,
        model::db::MembershipModel,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
    live: &'a LiveApiClient,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection, cache: &'a dyn Cache, live: &'a LiveApiClient) -> Self {
        Self { db, cache, live }
    }

    /// Looks up a user by Discord ID, reading through the cache
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The registered user
    /// - `Err(Error::NotFound)` - No user registered with this Discord ID; not cached
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_by_discord_id(&self, discord_id: &str) -> Result<UserDto, Error> {
        let db = self.db;

        self.cache
            .get_or_set(
                &keys::user_by_discord_id(discord_id),
                keys::USER_LOOKUP_TTL,
                move || async move {
                    let user = UserRepository::new(db)
                        .find_by_discord_id(discord_id)
                        .await?
                        .ok_or_else(|| {
                            Error::NotFound(format!(
                                "No user registered for Discord ID {}",
                                discord_id
                            ))
                        })?;

                    Ok(UserDto::from(user))
                },
            )
            .await
    }

    /// Resolves the caller and their active membership in a VA
    ///
    /// # Returns
    /// - `Ok(Some((user, membership)))` - The caller is an active member
    /// - `Ok(None)` - The caller is not registered or not a member of the VA
    pub async fn get_membership(
        &self,
        discord_id: &str,
        va_id: i32,
    ) -> Result<Option<(UserDto, MembershipModel)>, Error> {
        let user = match self.get_by_discord_id(discord_id).await {
            Ok(user) => user,
            Err(Error::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let membership = MembershipRepository::new(self.db)
            .find(user.id, va_id)
            .await?;

        Ok(membership.map(|membership| (user, membership)))
    }

    /// Registers a Discord user and links their Infinite Flight Community account.
    ///
    /// The local lookup and the Live API lookup are independent and run concurrently; a
    /// missing local user is a value, not an error. An already registered user has their
    /// link replaced.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - The created or updated user
    /// - `Err(Error::NotFound)` - No Infinite Flight user with this username exists
    /// - `Err(Error::LiveApiError)` - The Live API lookup failed
    pub async fn register(&self, discord_id: &str, ifc_username: &str) -> Result<UserDto, Error> {
        let ifc_username = ifc_username.trim();
        if ifc_username.is_empty() {
            return Err(Error::Validation("IFC username must not be empty".to_string()));
        }

        let user_repo = UserRepository::new(self.db);

        let (existing, live_user) = tokio::try_join!(
            async {
                user_repo
                    .find_by_discord_id(discord_id)
                    .await
                    .map_err(Error::from)
            },
            async {
                self.live
                    .find_user_by_username(ifc_username)
                    .await
                    .map_err(Error::from)
            },
        )?;

        let live_user = live_user.ok_or_else(|| {
            Error::NotFound(format!(
                "No Infinite Flight Community user named {}",
                ifc_username
            ))
        })?;

        let user = match existing {
            Some(user) => {
                user_repo
                    .update_ifc_identity(user, ifc_username.to_string(), live_user.user_id)
                    .await?
            }
            None => {
                user_repo
                    .create(
                        discord_id,
                        Some(ifc_username.to_string()),
                        Some(live_user.user_id),
                    )
                    .await?
            }
        };

        self.cache
            .invalidate(&keys::user_by_discord_id(discord_id))
            .await;

        tracing::info!(user_id = user.id, "Registered user {}", ifc_username);

        Ok(user.into())
    }
}
