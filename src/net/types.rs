//! Wire DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! The API is document-store backed and sends record ids as `_id`; some
//! endpoints also include a virtual `id`. Records therefore deserialize
//! through a raw shape that accepts either key, and always serialize `id`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Closed set of account roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }
}

/// An authenticated identity as returned by `/api/auth/me`, login, and register.
///
/// Also used for `/api/users` directory entries, which share the shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionUser")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Deserialize)]
struct RawSessionUser {
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    name: String,
    #[serde(default)]
    email: String,
    role: Role,
}

impl TryFrom<RawSessionUser> for SessionUser {
    type Error = String;

    fn try_from(raw: RawSessionUser) -> Result<Self, Self::Error> {
        Ok(Self { id: pick_id(raw.id, raw.mongo_id)?, name: raw.name, email: raw.email, role: raw.role })
    }
}

/// Task workflow status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire value, also used as the `<option>` value in status pickers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

/// Task priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == raw)
    }
}

/// A user a task is assigned to, when the API populates the reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignee")]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct RawAssignee {
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    name: String,
    email: Option<String>,
}

impl TryFrom<RawAssignee> for Assignee {
    type Error = String;

    fn try_from(raw: RawAssignee) -> Result<Self, Self::Error> {
        Ok(Self { id: pick_id(raw.id, raw.mongo_id)?, name: raw.name, email: raw.email })
    }
}

/// Assignee reference: populated user object or bare user id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssigneeRef {
    Populated(Assignee),
    Id(String),
}

impl AssigneeRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(assignee) => &assignee.id,
            Self::Id(id) => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Populated(assignee) => Some(&assignee.name),
            Self::Id(_) => None,
        }
    }
}

/// A task record from `/api/tasks`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<AssigneeRef>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

#[derive(Deserialize)]
struct RawTask {
    id: Option<String>,
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(rename = "assignedTo", default)]
    assigned_to: Option<AssigneeRef>,
    #[serde(rename = "dueDate", default)]
    due_date: Option<String>,
}

impl TryFrom<RawTask> for Task {
    type Error = String;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pick_id(raw.id, raw.mongo_id)?,
            title: raw.title,
            description: raw.description,
            status: raw.status,
            priority: raw.priority,
            assigned_to: raw.assigned_to,
            due_date: raw.due_date,
        })
    }
}

impl Task {
    pub fn assignee_id(&self) -> Option<&str> {
        self.assigned_to.as_ref().map(AssigneeRef::id)
    }
}

fn pick_id(id: Option<String>, mongo_id: Option<String>) -> Result<String, String> {
    id.or(mongo_id).ok_or_else(|| "record is missing `id`/`_id`".to_owned())
}

/// `{ data: T }` wrapper used by read endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Login/register success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

/// `POST /api/auth/login` body.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register` body.
#[derive(Clone, Serialize)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Partial update for `PUT /api/tasks/:id`. Absent fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }
}

/// `POST /api/tasks` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}
