//! `IUserStorage` trait: authors of condition changes.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::{NewUser, User};

pub trait IUserStorage: Send + Sync {
    fn insert_user(&self, user: NewUser) -> Result<User, StorageError>;

    fn select_user_by_uuid(&self, uuid: &str) -> Result<Option<User>, StorageError>;
}

impl<T: IUserStorage + ?Sized> IUserStorage for Arc<T> {
    fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        (**self).insert_user(user)
    }
    fn select_user_by_uuid(&self, uuid: &str) -> Result<Option<User>, StorageError> {
        (**self).select_user_by_uuid(uuid)
    }
}
