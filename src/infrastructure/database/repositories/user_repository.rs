//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Employer => UserRole::Employer,
        user::UserRole::Manager => UserRole::Manager,
    }
}

fn role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Employer => user::UserRole::Employer,
        UserRole::Manager => user::UserRole::Manager,
    }
}

fn entity_to_domain(u: user::Model) -> User {
    User {
        id: u.id,
        name: u.name,
        email: u.email,
        password_hash: u.password_hash,
        role: role_to_domain(u.role),
        created_at: u.created_at,
        updated_at: u.updated_at,
    }
}

fn domain_to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        name: Set(u.name),
        email: Set(u.email),
        password_hash: Set(u.password_hash),
        role: Set(role_to_entity(u.role)),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_managers(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(user::Column::Role.eq(user::UserRole::Manager))
            .order_by_asc(user::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn insert(&self, u: User) -> DomainResult<User> {
        // Surface the unique-email rule as a conflict instead of letting
        // the index violation bubble up as an opaque storage error.
        if self.find_by_email(&u.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                u.email
            )));
        }

        let result = domain_to_active(u).insert(&self.db).await.map_err(db_err)?;
        info!("User created: {} ({})", result.email, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, u: User) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(&u.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("user", u.id));
        }

        domain_to_active(u).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("user", id));
        }
        info!("User deleted: {}", id);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
