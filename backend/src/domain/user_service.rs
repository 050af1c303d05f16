//! Account lifecycle service.
//!
//! Implements the [`UserCommand`] and [`UserQuery`] driving ports on top of a
//! [`UserRepository`] and a [`PasswordHasher`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    PasswordHasher, PasswordHasherError, UserCommand, UserQuery, UserRepository,
    UserRepositoryError,
};
use crate::domain::value::{Email, PasswordHash};
use crate::domain::{Error, NewUser, User, UserId, validate_caller_id, validate_raw_password};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateEmail { email } => {
            Error::already_exists(format!("User with email={email} already exists"))
        }
        UserRepositoryError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("User id={id} not found"))
}

/// Load a user or fail with not-found.
pub(crate) async fn require_user<R>(users: &R, id: UserId) -> Result<User, Error>
where
    R: UserRepository + ?Sized,
{
    users
        .find_by_id(id)
        .await
        .map_err(map_user_repository_error)?
        .ok_or_else(|| user_not_found(id))
}

/// Account service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R, H> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> UserService<R, H> {
    /// Create a new service with its repository, hasher, and clock.
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            hasher,
            clock,
        }
    }
}

impl<R, H> UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn ensure_email_available(&self, email: &Email) -> Result<(), Error> {
        debug!("checking email uniqueness");
        let taken = self
            .user_repo
            .exists_by_email(email)
            .await
            .map_err(map_user_repository_error)?;
        if taken {
            return Err(Error::already_exists(format!(
                "User with email={email} already exists"
            )));
        }
        Ok(())
    }

    async fn hash_password(&self, raw_password: Option<&str>) -> Result<PasswordHash, Error> {
        debug!("validating raw password");
        let raw_password = validate_raw_password(raw_password)?;

        debug!("encoding password");
        let encoded = self
            .hasher
            .encode(raw_password)
            .await
            .map_err(map_hasher_error)?;
        Ok(PasswordHash::new(encoded)?)
    }
}

#[async_trait]
impl<R, H> UserCommand for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn create_user(
        &self,
        email: Option<String>,
        raw_password: Option<String>,
    ) -> Result<User, Error> {
        let raw_password = Zeroizing::new(raw_password);
        info!(email = email.as_deref().unwrap_or("<null>"), "creating user");

        debug!("validating email");
        let email = Email::from_nullable(email)?;
        self.ensure_email_available(&email).await?;
        let password_hash = self.hash_password(raw_password.as_deref()).await?;

        debug!("persisting user");
        let user = self
            .user_repo
            .insert(&NewUser {
                email,
                password_hash,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn change_email(
        &self,
        id: Option<i64>,
        new_email: Option<String>,
    ) -> Result<User, Error> {
        info!(user_id = ?id, "changing user email");

        debug!("validating user id");
        let id = validate_caller_id(id)?;

        debug!("checking user existence");
        let mut user = require_user(self.user_repo.as_ref(), id).await?;

        debug!("validating email");
        let email = Email::from_nullable(new_email)?;
        self.ensure_email_available(&email).await?;

        user.change_email(email);
        debug!("persisting user");
        let user = self
            .user_repo
            .save(&user)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %id, "user email changed");
        Ok(user)
    }

    async fn change_password(
        &self,
        id: Option<i64>,
        new_raw_password: Option<String>,
    ) -> Result<User, Error> {
        let new_raw_password = Zeroizing::new(new_raw_password);
        info!(user_id = ?id, "changing user password");

        debug!("validating user id");
        let id = validate_caller_id(id)?;

        debug!("checking user existence");
        let mut user = require_user(self.user_repo.as_ref(), id).await?;
        let password_hash = self.hash_password(new_raw_password.as_deref()).await?;

        user.change_password(password_hash);
        debug!("persisting user");
        let user = self
            .user_repo
            .save(&user)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %id, "user password changed");
        Ok(user)
    }

    async fn delete_user(&self, id: Option<i64>) -> Result<(), Error> {
        info!(user_id = ?id, "deleting user");

        debug!("validating user id");
        let id = validate_caller_id(id)?;

        debug!("checking user existence");
        require_user(self.user_repo.as_ref(), id).await?;

        debug!("deleting user row");
        self.user_repo
            .delete_by_id(id)
            .await
            .map_err(map_user_repository_error)?;

        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, H> UserQuery for UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn get_user(&self, id: Option<i64>) -> Result<User, Error> {
        info!(user_id = ?id, "getting user");

        debug!("validating user id");
        let id = validate_caller_id(id)?;
        let user = require_user(self.user_repo.as_ref(), id).await?;

        info!(user_id = %id, "user retrieved");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        info!("listing users");
        let users = self
            .user_repo
            .find_all()
            .await
            .map_err(map_user_repository_error)?;

        info!(count = users.len(), "users retrieved");
        Ok(users)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
