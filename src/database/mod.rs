pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use models::{Column, Task};
pub use postgres::{PgColumnRepository, PgProjectRoleStore};
pub use repository::{ColumnRepository, ProjectRoleStore, RepositoryError};
