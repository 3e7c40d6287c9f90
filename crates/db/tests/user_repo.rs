//! User repository tests against the in-memory store.

use assert_matches::assert_matches;
use quizbank_core::error::CoreError;
use quizbank_core::user::{CreateUser, UpdateUser};
use quizbank_db::repositories::UserRepo;
use quizbank_db::store::MemoryStore;
use quizbank_db::DbError;
use std::sync::Arc;
use uuid::Uuid;

fn new_user(username: &str, role: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        first_name: None,
        last_name: None,
        email: Some(format!("{username}@test.com")),
        password_hash: "$argon2id$placeholder".to_string(),
        role: role.to_string(),
    }
}

#[tokio::test]
async fn create_and_find() {
    let store = MemoryStore::new();
    let user = UserRepo::create(&store, &new_user("ada", "admin")).await.unwrap();

    let by_id = UserRepo::find_by_id(&store, user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "ada");

    let by_name = UserRepo::find_by_username(&store, "ada")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(UserRepo::find_by_username(&store, "ADA")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn usernames_are_unique() {
    let store = MemoryStore::new();
    UserRepo::create(&store, &new_user("ada", "admin")).await.unwrap();
    let result = UserRepo::create(&store, &new_user("ada", "editor")).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_of_one_username_yield_one_account() {
    let store = Arc::new(MemoryStore::new());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            UserRepo::create(store.as_ref(), &new_user("dup", "editor")).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert_matches!(err, DbError::Core(CoreError::Conflict(_))),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(UserRepo::list(store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rename_onto_existing_username_conflicts() {
    let store = MemoryStore::new();
    UserRepo::create(&store, &new_user("ada", "admin")).await.unwrap();
    let bob = UserRepo::create(&store, &new_user("bob", "editor")).await.unwrap();

    let result = UserRepo::update(
        &store,
        bob.id,
        UpdateUser {
            username: Some("ada".into()),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
}

#[tokio::test]
async fn update_missing_user_returns_none() {
    let store = MemoryStore::new();
    let result = UserRepo::update(&store, Uuid::now_v7(), UpdateUser::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn password_update_and_delete() {
    let store = MemoryStore::new();
    let user = UserRepo::create(&store, &new_user("ada", "admin")).await.unwrap();

    assert!(UserRepo::update_password(&store, user.id, "$argon2id$new")
        .await
        .unwrap());
    let stored = UserRepo::find_by_id(&store, user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "$argon2id$new");

    assert!(UserRepo::delete(&store, user.id).await.unwrap());
    assert!(!UserRepo::delete(&store, user.id).await.unwrap());
    assert!(!UserRepo::update_password(&store, user.id, "x").await.unwrap());
}

#[tokio::test]
async fn list_returns_creation_order() {
    let store = MemoryStore::new();
    for name in ["a", "b", "c"] {
        UserRepo::create(&store, &new_user(name, "candidate"))
            .await
            .unwrap();
    }
    let names: Vec<_> = UserRepo::list(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}
