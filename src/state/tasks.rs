//! Role rules and dashboard summaries over task lists.
//!
//! DESIGN
//! ======
//! The API already scopes `/api/tasks` by role. These rules mirror that scope
//! on the client so views never offer an action the API will refuse.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use crate::net::types::{Role, SessionUser, Task, TaskStatus};

/// Task list state for the dashboard and admin views.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TasksState {
    pub items: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TasksState {
    /// Swap in the server's copy of an updated task, or append a new one.
    pub fn upsert(&mut self, task: Task) {
        match self.items.iter_mut().find(|item| item.id == task.id) {
            Some(slot) => *slot = task,
            None => self.items.push(task),
        }
    }

    pub fn remove(&mut self, task_id: &str) {
        self.items.retain(|item| item.id != task_id);
    }
}

/// Admins see all tasks; employees see tasks assigned to them.
pub fn can_view_task(user: &SessionUser, task: &Task) -> bool {
    user.role.is_admin() || task.assignee_id() == Some(user.id.as_str())
}

/// Only the assignee moves a task through its workflow.
pub fn can_update_status(user: &SessionUser, task: &Task) -> bool {
    task.assignee_id() == Some(user.id.as_str())
}

/// Create, reassign, and delete are admin-only.
pub fn can_manage_tasks(user: &SessionUser) -> bool {
    user.role.is_admin()
}

/// Tasks from `tasks` that `user` may see.
pub fn visible_tasks<'a>(user: &SessionUser, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks.iter().filter(|task| can_view_task(user, task)).collect()
}

/// Assignable users from a directory listing.
pub fn employees(users: &[SessionUser]) -> Vec<SessionUser> {
    users.iter().filter(|user| user.role == Role::Employee).cloned().collect()
}

/// Per-status counts for dashboard headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }
}
