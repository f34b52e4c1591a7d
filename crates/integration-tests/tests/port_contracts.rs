//! Behaviour every `ThreadRepository` must share, run against each store.

use domains::{BoardError, Entity, ThreadRepository};
use integration_tests::{at, reply_at, thread_at};
use storage_adapters::InMemoryThreadRepository;

async fn round_trips_documents(repo: &dyn ThreadRepository) {
    let mut thread = thread_at("test", "op", 0);
    reply_at(&mut thread, "first", 1);
    thread.report();
    repo.insert(&thread).await.unwrap();

    let found = repo.find_by_id(thread.id).await.unwrap();
    assert_eq!(found.as_ref(), Some(&thread));
    assert_eq!(repo.find_in_board(thread.id, "test").await.unwrap(), Some(thread.clone()));
    assert_eq!(repo.find_in_board(thread.id, "other").await.unwrap(), None);
}

async fn lists_by_bump_with_limit(repo: &dyn ThreadRepository) {
    let mut threads = Vec::new();
    for minute in 0..12 {
        let thread = thread_at("busy", &format!("thread {minute}"), minute);
        repo.insert(&thread).await.unwrap();
        threads.push(thread);
    }
    repo.insert(&thread_at("quiet", "elsewhere", 100)).await.unwrap();

    let listed = repo.list_by_board("busy", 10).await.unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0].text, "thread 11");
    assert_eq!(listed[9].text, "thread 2");

    reply_at(&mut threads[0], "necro", 50);
    repo.save(&threads[0]).await.unwrap();

    let listed = repo.list_by_board("busy", 10).await.unwrap();
    assert_eq!(listed[0].id, threads[0].id);
    assert_eq!(listed[0].bumped_on, at(50));
    assert!(listed.iter().all(|t| t.board == "busy"));
}

async fn ties_keep_insertion_order(repo: &dyn ThreadRepository) {
    let first = thread_at("tied", "first", 5);
    let second = thread_at("tied", "second", 5);
    repo.insert(&first).await.unwrap();
    repo.insert(&second).await.unwrap();

    let listed = repo.list_by_board("tied", 10).await.unwrap();
    let texts: Vec<&str> = listed.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["first", "second"]);
}

async fn list_all_spans_boards_in_insertion_order(repo: &dyn ThreadRepository) {
    repo.insert(&thread_at("b", "late board b", 9)).await.unwrap();
    repo.insert(&thread_at("a", "early board a", 1)).await.unwrap();

    let all = repo.list_all().await.unwrap();
    let texts: Vec<&str> = all.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["late board b", "early board a"]);
}

async fn delete_is_final(repo: &dyn ThreadRepository) {
    let thread = thread_at("test", "doomed", 0);
    repo.insert(&thread).await.unwrap();

    assert!(repo.delete(thread.id).await.unwrap());
    assert!(!repo.delete(thread.id).await.unwrap());
    assert_eq!(repo.find_by_id(thread.id).await.unwrap(), None);

    let err = repo.save(&thread).await.unwrap_err();
    assert!(matches!(err, BoardError::NotFound(Entity::Thread, _)));
}

macro_rules! contract_suite {
    ($module:ident, $make:expr) => {
        mod $module {
            use super::*;

            #[tokio::test]
            async fn round_trips_documents() {
                let repo = $make;
                super::round_trips_documents(&repo).await;
            }

            #[tokio::test]
            async fn lists_by_bump_with_limit() {
                let repo = $make;
                super::lists_by_bump_with_limit(&repo).await;
            }

            #[tokio::test]
            async fn ties_keep_insertion_order() {
                let repo = $make;
                super::ties_keep_insertion_order(&repo).await;
            }

            #[tokio::test]
            async fn list_all_spans_boards_in_insertion_order() {
                let repo = $make;
                super::list_all_spans_boards_in_insertion_order(&repo).await;
            }

            #[tokio::test]
            async fn delete_is_final() {
                let repo = $make;
                super::delete_is_final(&repo).await;
            }
        }
    };
}

contract_suite!(memory, InMemoryThreadRepository::new());

#[cfg(feature = "db-sqlite")]
contract_suite!(
    sqlite,
    storage_adapters::SqliteThreadRepository::connect("sqlite::memory:", 1)
        .await
        .unwrap()
);
