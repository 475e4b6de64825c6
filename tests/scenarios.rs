//! End-to-end behavior of the form, data access and cache layers against the
//! in-memory store.

use std::sync::Arc;

use serde_json::json;

use listwise::adapters::InMemoryRemote;
use listwise::api::ApiError;
use listwise::cache::{CacheState, QueryKey};
use listwise::client::{SubmitError, TodoClient};
use listwise::context::ServiceContext;
use listwise::form::{
    normalize, validate_task, Field, RawTaskInput, TaskForm, ViolationKind,
};
use listwise::model::{Priority, ResourceKind, TaskPatch};
use listwise::ports::Method;

fn setup() -> (TodoClient, Arc<InMemoryRemote>) {
    let store = Arc::new(InMemoryRemote::new());
    (ServiceContext::in_memory(Arc::clone(&store)).client(), store)
}

async fn seed_todos(client: &TodoClient, count: usize) {
    for n in 1..=count {
        let mut form = TaskForm::create(1);
        form.set(Field::Title, format!("task {n}"));
        client.submit(&form).await.unwrap();
    }
}

#[tokio::test]
async fn buy_milk_is_normalized_and_created() {
    let (client, store) = setup();
    let mut form = TaskForm::create(3);
    form.set(Field::Title, "Buy milk");
    form.set(Field::Tags, "home, errand ,  shopping");
    form.set(Field::EstimatedTime, "2.5");
    form.set(Field::Completed, "true");
    assert!(form.is_valid());

    let task = client.submit(&form).await.unwrap();

    let post = store.requests().pop().unwrap();
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path, "/todos");
    assert_eq!(
        post.body,
        Some(json!({
            "title": "Buy milk",
            "description": "",
            "priority": "low",
            "tags": ["home", "errand", "shopping"],
            "completed": true,
            "estimatedTime": 2.5,
            "actualTimeSpent": 0.0,
            "comments": [],
            "listId": 3
        }))
    );
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.due_date, None);
    assert_eq!(task.list_id, 3);
}

#[tokio::test]
async fn empty_title_never_reaches_data_access() {
    let (client, store) = setup();
    let mut form = TaskForm::create(1);
    form.set(Field::Title, "");

    let Err(SubmitError::Invalid(violations)) = client.submit(&form).await else {
        panic!("expected a validation failure");
    };
    assert_eq!(violations.kinds(), vec![(Field::Title, ViolationKind::RequiredField)]);
    assert!(store.requests().is_empty());
}

#[test]
fn empty_title_is_rejected_whatever_else_is_valid() {
    for (priority, estimate) in [("high", "1"), ("bogus", "-3"), ("", "x")] {
        let raw = RawTaskInput {
            title: "   ".into(),
            priority: priority.into(),
            estimated_time: estimate.into(),
            list_id: "1".into(),
            ..RawTaskInput::default()
        };
        let violations = validate_task(&normalize(&raw)).unwrap_err();
        assert_eq!(violations.kinds()[0], (Field::Title, ViolationKind::RequiredField));
    }
}

#[test]
fn numeric_fields_accept_non_negative_and_reject_the_rest() {
    let check = |estimate: &str| {
        let raw = RawTaskInput {
            title: "t".into(),
            estimated_time: estimate.into(),
            list_id: "1".into(),
            ..RawTaskInput::default()
        };
        validate_task(&normalize(&raw)).map_err(|v| v.kinds())
    };

    for ok in ["0", "0.5", "2", "1e3", " 7 "] {
        assert!(check(ok).is_ok(), "{ok:?} should be accepted");
    }
    for negative in ["-1", "-0.25"] {
        assert_eq!(check(negative), Err(vec![(Field::EstimatedTime, ViolationKind::OutOfRange)]));
    }
    for garbage in ["abc", "1,5", "NaN", "inf"] {
        assert_eq!(check(garbage), Err(vec![(Field::EstimatedTime, ViolationKind::InvalidType)]));
    }
}

#[test]
fn tag_normalization_is_idempotent() {
    for raw in ["home, errand ,  shopping", ",,a,, b ,", "", "single"] {
        let once = normalize(&RawTaskInput { tags: raw.into(), ..RawTaskInput::default() }).tags;
        let twice =
            normalize(&RawTaskInput { tags: once.join(","), ..RawTaskInput::default() }).tags;
        assert_eq!(once, twice);
    }
}

#[tokio::test]
async fn update_marks_read_all_stale_and_refetch_shows_it() {
    let (client, store) = setup();
    seed_todos(&client, 7).await;

    let before = client.todos().await.unwrap();
    assert!(!before[6].completed);
    assert_eq!(client.cache().state(QueryKey::Todos), Some(CacheState::Fresh));

    client.update_todo(7, &TaskPatch::completed(true)).await.unwrap();
    assert_eq!(client.cache().state(QueryKey::Todos), Some(CacheState::Stale));

    let gets_before = store.requests().iter().filter(|r| r.method == Method::Get).count();
    let after = client.todos().await.unwrap();
    let gets_after = store.requests().iter().filter(|r| r.method == Method::Get).count();

    assert_eq!(gets_after, gets_before + 1);
    assert!(after.iter().find(|t| t.id == 7).unwrap().completed);
    assert_eq!(client.cache().state(QueryKey::Todos), Some(CacheState::Fresh));
}

#[tokio::test]
async fn deleted_list_reads_as_not_found() {
    let (client, _) = setup();
    client.create_list_named("Home").await.unwrap();
    let work = client.create_list_named("Work").await.unwrap();
    assert_eq!(work.id, 2);
    assert_eq!(client.list(2).await.unwrap().name, "Work");

    client.delete_list(2).await.unwrap();

    assert_eq!(
        client.list(2).await.unwrap_err(),
        ApiError::NotFound { resource: ResourceKind::Lists, id: 2 }
    );
}
