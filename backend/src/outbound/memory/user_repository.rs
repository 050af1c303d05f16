//! In-process `UserRepository` implementation.

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::value::Email;
use crate::domain::{NewUser, User, UserId};

use super::rows::UserRow;
use super::{MemoryStore, Tables};

/// User repository over the shared [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    /// Create a repository over `store`.
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn to_user(row: &UserRow) -> Result<User, UserRepositoryError> {
    row.to_user().map_err(UserRepositoryError::query)
}

fn insert_user(tables: &mut Tables, user: &NewUser) -> Result<User, UserRepositoryError> {
    let email = user.email.value();
    if tables.users_by_email.contains_key(email) {
        return Err(UserRepositoryError::duplicate_email(email.as_str()));
    }
    let id = tables.next_user_id();
    let row = UserRow::from_new(id, user);
    let stored = to_user(&row)?;
    tables.users_by_email.insert(email.clone(), id);
    tables.users.insert(id, row);
    Ok(stored)
}

fn save_user(tables: &mut Tables, user: &User) -> Result<User, UserRepositoryError> {
    let id = user.id().get();
    let previous_email = tables
        .users
        .get(&id)
        .ok_or_else(|| UserRepositoryError::query(format!("user {id} does not exist")))?
        .email
        .clone();

    let email = user.email().value();
    if let Some(holder) = tables.users_by_email.get(email) {
        if *holder != id {
            return Err(UserRepositoryError::duplicate_email(email.as_str()));
        }
    }

    let row = UserRow::from_user(user);
    let stored = to_user(&row)?;
    if let Some(previous) = previous_email {
        tables.users_by_email.remove(&previous);
    }
    tables.users_by_email.insert(email.clone(), id);
    tables.users.insert(id, row);
    Ok(stored)
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                insert_user(tables, user)
            })
    }

    async fn save(&self, user: &User) -> Result<User, UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                save_user(tables, user)
            })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                tables.users.get(&id.get()).map(to_user).transpose()
            })
    }

    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                tables.users.values().map(to_user).collect()
            })
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                Ok(tables.users_by_email.contains_key(email.value()))
            })
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.store
            .transact(UserRepositoryError::connection, |tables| {
                tables.remove_user_cascading(id.get());
                Ok(())
            })
    }
}
