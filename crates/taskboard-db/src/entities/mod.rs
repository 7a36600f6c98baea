//! Database entities

pub mod project;
pub mod task;
pub mod team_member;

pub use project::Entity as Project;
pub use task::Entity as Task;
pub use team_member::Entity as TeamMember;

pub mod prelude {
    pub use super::project::Entity as Project;
    pub use super::task::Entity as Task;
    pub use super::team_member::Entity as TeamMember;
}
