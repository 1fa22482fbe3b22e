//! Domain-focused tests for the task aggregate and audit events.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::identity::domain::UserId;
use crate::task::domain::{
    Priority, Task, TaskDomainError, TaskEvent, TaskEventType, TaskStatus, TaskTitle, TaskUpdate,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn owner() -> UserId {
    UserId::new("owner-1").expect("valid id")
}

#[fixture]
fn task(clock: DefaultClock) -> Task {
    Task::new(
        TaskTitle::new("Buy milk").expect("valid title"),
        String::new(),
        Priority::Normal,
        owner(),
        &clock,
    )
}

#[rstest]
fn title_rejects_whitespace_only_input() {
    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn title_rejects_oversized_input() {
    let long = "x".repeat(201);
    assert_eq!(TaskTitle::new(long), Err(TaskDomainError::TitleTooLong(201)));
}

#[rstest]
fn title_trims_surrounding_whitespace() {
    let title = TaskTitle::new("  Buy milk  ").expect("valid title");
    assert_eq!(title.as_str(), "Buy milk");
}

#[rstest]
fn new_task_has_expected_defaults(task: Task) {
    assert_eq!(task.status(), TaskStatus::New);
    assert_eq!(task.priority(), Priority::Normal);
    assert_eq!(task.assignee_id(), None);
    assert_eq!(task.owner_id(), &owner());
    assert!(!task.is_deleted());
    assert_eq!(task.version(), 1);
    assert_eq!(task.due_date(), None);
}

#[rstest]
fn assignment_replaces_the_previous_holder(clock: DefaultClock, mut task: Task) {
    let first = UserId::new("worker-1").expect("valid id");
    let second = UserId::new("worker-2").expect("valid id");

    let none = task
        .assign(first.clone(), &clock)
        .expect("first assignment should succeed");
    let replaced = task
        .assign(second.clone(), &clock)
        .expect("takeover should succeed");

    assert_eq!(none, None);
    assert_eq!(replaced, Some(first));
    assert!(task.is_assignee(&second));
}

#[rstest]
fn terminal_task_rejects_assignment(clock: DefaultClock, mut task: Task) {
    let worker = UserId::new("worker-1").expect("valid id");
    task.assign(worker.clone(), &clock)
        .expect("assignment should succeed");
    task.transition_to(TaskStatus::InProgress, &worker, &clock)
        .expect("start should succeed");
    task.transition_to(TaskStatus::Canceled, &worker, &clock)
        .expect("cancel should succeed");

    let result = task.assign(owner(), &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::TerminalTask {
            task_id: task.id(),
            status: TaskStatus::Canceled,
        })
    );
}

#[rstest]
fn apply_update_records_old_and_new_values(clock: DefaultClock, mut task: Task) {
    let update = TaskUpdate {
        title: Some(TaskTitle::new("Buy oat milk").expect("valid title")),
        description: Some("two cartons".to_owned()),
        priority: Some(Priority::High),
    };

    let changes = task
        .apply_update(update, &clock)
        .expect("update should succeed")
        .expect("changes should be recorded");

    assert_eq!(
        changes,
        json!({
            "title": { "from": "Buy milk", "to": "Buy oat milk" },
            "description": { "from": "", "to": "two cartons" },
            "priority": { "from": "NORMAL", "to": "HIGH" },
        })
    );
    assert_eq!(task.title().as_str(), "Buy oat milk");
    assert_eq!(task.priority(), Priority::High);
}

#[rstest]
fn apply_update_without_effective_change_is_silent(clock: DefaultClock, mut task: Task) {
    let update = TaskUpdate {
        title: Some(TaskTitle::new("Buy milk").expect("valid title")),
        description: None,
        priority: Some(Priority::Normal),
    };

    let changes = task.apply_update(update, &clock).expect("update should succeed");

    assert_eq!(changes, None);
}

#[rstest]
fn apply_update_on_terminal_task_is_rejected(clock: DefaultClock, mut task: Task) {
    let worker = UserId::new("worker-1").expect("valid id");
    task.assign(worker.clone(), &clock)
        .expect("assignment should succeed");
    task.transition_to(TaskStatus::InProgress, &worker, &clock)
        .expect("start should succeed");
    task.transition_to(TaskStatus::Done, &worker, &clock)
        .expect("finish should succeed");

    let update = TaskUpdate {
        title: Some(TaskTitle::new("Too late").expect("valid title")),
        ..TaskUpdate::default()
    };
    let result = task.apply_update(update, &clock);

    assert_eq!(
        result,
        Err(TaskDomainError::TerminalTask {
            task_id: task.id(),
            status: TaskStatus::Done,
        })
    );
}

#[rstest]
fn mark_deleted_is_idempotent(clock: DefaultClock, mut task: Task) {
    assert!(task.mark_deleted(&clock));
    assert!(!task.mark_deleted(&clock));
    assert!(task.is_deleted());
}

#[rstest]
fn deletion_is_allowed_from_terminal_status(clock: DefaultClock, mut task: Task) {
    let worker = UserId::new("worker-1").expect("valid id");
    task.assign(worker.clone(), &clock)
        .expect("assignment should succeed");
    task.transition_to(TaskStatus::InProgress, &worker, &clock)
        .expect("start should succeed");
    task.transition_to(TaskStatus::Done, &worker, &clock)
        .expect("finish should succeed");

    assert!(task.mark_deleted(&clock));
}

#[rstest]
fn persisted_round_trip_preserves_every_field(clock: DefaultClock, mut task: Task) {
    let worker = UserId::new("worker-1").expect("valid id");
    task.assign(worker, &clock).expect("assignment should succeed");

    let restored = Task::from_persisted(task.to_persisted());

    assert_eq!(restored, task);
}

#[rstest]
fn created_event_carries_the_owner(clock: DefaultClock, task: Task) {
    let event = TaskEvent::created(task.id(), &owner(), &clock);

    assert_eq!(event.task_id(), task.id());
    assert_eq!(event.event_type(), TaskEventType::Created);
    assert_eq!(event.meta(), &json!({ "owner": "owner-1" }));
}

#[rstest]
fn assigned_event_tracks_the_handover(clock: DefaultClock, task: Task) {
    let from = UserId::new("worker-1").expect("valid id");
    let to = UserId::new("worker-2").expect("valid id");

    let event = TaskEvent::assigned(task.id(), Some(&from), &to, &owner(), &clock);

    assert_eq!(event.event_type(), TaskEventType::Assigned);
    assert_eq!(
        event.meta(),
        &json!({ "from": "worker-1", "to": "worker-2", "by": "owner-1" })
    );
}

#[rstest]
fn status_changed_event_records_both_ends(clock: DefaultClock, task: Task) {
    let event = TaskEvent::status_changed(
        task.id(),
        TaskStatus::New,
        TaskStatus::InProgress,
        &owner(),
        &clock,
    );

    assert_eq!(event.event_type(), TaskEventType::StatusChanged);
    assert_eq!(
        event.meta(),
        &json!({ "from": "NEW", "to": "IN_PROGRESS", "by": "owner-1" })
    );
}

#[rstest]
#[case("CREATED", TaskEventType::Created)]
#[case("status_changed", TaskEventType::StatusChanged)]
fn event_type_parses_case_insensitively(#[case] input: &str, #[case] expected: TaskEventType) {
    assert_eq!(TaskEventType::try_from(input), Ok(expected));
}

#[rstest]
#[case("low", Priority::Low)]
#[case("NORMAL", Priority::Normal)]
#[case(" High ", Priority::High)]
fn priority_parses_case_insensitively(#[case] input: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(input), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_values() {
    assert!(Priority::try_from("URGENT").is_err());
}
