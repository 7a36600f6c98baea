//! Task entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Progress state of a task. New tasks always start at `Todo`; any state can
/// move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started yet
    #[sea_orm(string_value = "todo")]
    Todo,

    /// Being worked on
    #[sea_orm(string_value = "inprogress")]
    InProgress,

    /// Finished
    #[sea_orm(string_value = "done")]
    Done,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    /// Task UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// What needs to be done
    pub description: String,

    /// Person in charge (team member name, soft reference)
    pub pic: String,

    /// Owning project name (soft reference, used for cascade delete)
    pub project: String,

    pub due_date: ChronoDate,

    pub status: TaskStatus,

    pub created_at: ChronoDateTimeUtc,

    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"inprogress\""
        );
    }
}
