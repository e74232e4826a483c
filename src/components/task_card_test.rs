use super::*;
use crate::net::types::{Assignee, AssigneeRef, Priority};

fn task(assigned_to: Option<AssigneeRef>) -> Task {
    Task {
        id: "t1".into(),
        title: "Ship it".into(),
        description: None,
        status: TaskStatus::InProgress,
        priority: Priority::High,
        assigned_to,
        due_date: None,
    }
}

#[test]
fn due_date_label_keeps_date_part() {
    assert_eq!(due_date_label("2024-05-01T00:00:00.000Z"), "2024-05-01");
    assert_eq!(due_date_label("2024-05-01"), "2024-05-01");
}

#[test]
fn status_modifier_is_css_safe() {
    assert_eq!(status_modifier(TaskStatus::InProgress), "in-progress");
}

#[test]
fn assignee_label_prefers_populated_name() {
    let populated = AssigneeRef::Populated(Assignee { id: "u2".into(), name: "Ben".into(), email: None });
    assert_eq!(assignee_label(&task(Some(populated))), "Ben");
    assert_eq!(assignee_label(&task(Some(AssigneeRef::Id("u2".into())))), "Assigned");
    assert_eq!(assignee_label(&task(None)), "Unassigned");
}
