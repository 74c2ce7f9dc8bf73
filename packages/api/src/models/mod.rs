//! Wire models shared by the auth and task clients.

mod task;

pub use store::{Session, User};
pub use task::{Task, TaskDraft, TaskList};
