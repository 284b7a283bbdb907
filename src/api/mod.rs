pub mod types;

pub use types::{Member, Task, TaskStatus, Workspace};
