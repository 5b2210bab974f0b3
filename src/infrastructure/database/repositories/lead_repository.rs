//! SeaORM implementation of LeadRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::lead::{Lead, LeadRepository, LeadStatus};
use crate::domain::user::ManagerRef;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{lead, user};

use super::user_repository::db_err;

fn status_to_domain(s: lead::LeadStatus) -> LeadStatus {
    match s {
        lead::LeadStatus::InProgress => LeadStatus::InProgress,
        lead::LeadStatus::Completed => LeadStatus::Completed,
        lead::LeadStatus::Canceled => LeadStatus::Canceled,
    }
}

fn status_to_entity(s: LeadStatus) -> lead::LeadStatus {
    match s {
        LeadStatus::InProgress => lead::LeadStatus::InProgress,
        LeadStatus::Completed => lead::LeadStatus::Completed,
        LeadStatus::Canceled => lead::LeadStatus::Canceled,
    }
}

fn entity_to_domain(l: lead::Model) -> Lead {
    Lead {
        id: l.id,
        name: l.name,
        email: l.email,
        phone: l.phone,
        company: l.company,
        status: status_to_domain(l.status),
        value: l.value,
        notes: l.notes,
        manager_id: l.manager_id,
        created_at: l.created_at,
        updated_at: l.updated_at,
    }
}

fn domain_to_active(l: Lead) -> lead::ActiveModel {
    lead::ActiveModel {
        id: Set(l.id),
        name: Set(l.name),
        email: Set(l.email),
        phone: Set(l.phone),
        company: Set(l.company),
        status: Set(status_to_entity(l.status)),
        value: Set(l.value),
        notes: Set(l.notes),
        manager_id: Set(l.manager_id),
        created_at: Set(l.created_at),
        updated_at: Set(l.updated_at),
    }
}

fn manager_ref(u: user::Model) -> ManagerRef {
    ManagerRef {
        id: u.id,
        name: u.name,
        email: u.email,
    }
}

pub struct SeaOrmLeadRepository {
    db: DatabaseConnection,
}

impl SeaOrmLeadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepository for SeaOrmLeadRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Lead>> {
        let model = lead::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all_with_manager(&self) -> DomainResult<Vec<(Lead, Option<ManagerRef>)>> {
        let rows = lead::Entity::find()
            .find_also_related(user::Entity)
            .order_by_desc(lead::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|(l, u)| (entity_to_domain(l), u.map(manager_ref)))
            .collect())
    }

    async fn find_by_manager(&self, manager_id: &str) -> DomainResult<Vec<Lead>> {
        let models = lead::Entity::find()
            .filter(lead::Column::ManagerId.eq(manager_id))
            .order_by_desc(lead::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn insert(&self, l: Lead) -> DomainResult<Lead> {
        let result = domain_to_active(l).insert(&self.db).await.map_err(db_err)?;
        info!("Lead created: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, l: Lead) -> DomainResult<()> {
        let existing = lead::Entity::find_by_id(&l.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("lead", l.id));
        }

        domain_to_active(l).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = lead::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("lead", id));
        }
        info!("Lead deleted: {}", id);
        Ok(())
    }

    async fn count_by_status(&self, status: LeadStatus) -> DomainResult<u64> {
        lead::Entity::find()
            .filter(lead::Column::Status.eq(status_to_entity(status)))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
