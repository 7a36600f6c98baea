//! Business logic for the task board, separated from HTTP concerns.
//!
//! The [`BoardService`] enforces validation, uniqueness, and the
//! cascade-delete rule over a pluggable [`Store`]. Two stores ship: a SeaORM
//! one for SQLite/Postgres and an in-memory one used by the test harness and
//! the `--store memory` server mode. Mutations fan events out through a
//! [`Notifier`]; the realtime server wires a broadcast-backed notifier and
//! the plain REST variant wires the no-op one.

pub mod domain;
pub mod error;
pub mod events;
pub mod messages;
pub mod service;
pub mod store;

pub use domain::{
    DashboardStats, NewMember, NewTask, Page, Project, StatusCounts, Task, TaskFilter, TaskStatus,
    TeamMember,
};
pub use error::{ServiceError, StoreError};
pub use events::{BoardEvent, BroadcastNotifier, NoopNotifier, NoticeKind, Notifier};
pub use service::BoardService;
pub use store::{memory::MemoryStore, sea::SeaOrmStore, Store};
