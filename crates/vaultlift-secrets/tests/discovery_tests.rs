//! Breadth-first discovery against an in-memory namespace
//!
//! ```sh
//! cargo test --package vaultlift-secrets --test discovery_tests
//! ```

mod common;

use common::*;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vaultlift_core::SecretItem;
use vaultlift_secrets::{DiscoveryWarning, ListedItem, TreeDiscoverer};

fn identifiers(items: &[SecretItem]) -> Vec<&str> {
    items.iter().map(|i| i.identifier.as_str()).collect()
}

#[tokio::test]
async fn test_finds_every_secret_at_every_depth() {
    // /l1/.../l6, with one secret per level
    let mut store = InMemoryStore::new();
    let mut parent = String::new();
    for depth in 1..=6 {
        let child = format!("{}/l{}", parent, depth);
        let listing = if parent.is_empty() { "/" } else { parent.as_str() };
        store = store.with_children(
            listing,
            vec![folder(&child), static_secret(&format!("{}/s{}", child, depth))],
        );
        parent = child;
    }
    store = store.with_children(&parent, vec![static_secret(&format!("{}/leaf", parent))]);

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/", &CancellationToken::new()).await.unwrap();

    assert_eq!(discovery.items.len(), 7);
    assert!(discovery.warnings.is_empty());
    assert_eq!(discovery.containers_visited, 7);
    assert_eq!(
        discovery.items.last().unwrap().identifier,
        "/l1/l2/l3/l4/l5/l6/leaf"
    );
}

#[tokio::test]
async fn test_breadth_first_order() {
    let store = InMemoryStore::new()
        .with_children(
            "/app",
            vec![folder("/app/a"), static_secret("/app/top"), folder("/app/b")],
        )
        .with_children("/app/a", vec![static_secret("/app/a/one"), folder("/app/a/deep")])
        .with_children("/app/b", vec![static_secret("/app/b/two")])
        .with_children("/app/a/deep", vec![static_secret("/app/a/deep/three")]);

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/app", &CancellationToken::new()).await.unwrap();

    assert_eq!(
        identifiers(&discovery.items),
        vec!["/app/top", "/app/a/one", "/app/b/two", "/app/a/deep/three"]
    );
}

#[tokio::test]
async fn test_root_is_listed_without_filter() {
    let store = Arc::new(
        InMemoryStore::new()
            .with_children("/", vec![folder("/app")])
            .with_children("/app", vec![static_secret("/app/db")]),
    );

    TreeDiscoverer::new(store.clone())
        .discover("/", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(store.list_calls(), vec![None, Some("/app".to_string())]);
}

#[tokio::test]
async fn test_failing_subtree_is_skipped() {
    let store = InMemoryStore::new()
        .with_children("/", vec![folder("/good"), folder("/bad")])
        .with_children("/good", vec![static_secret("/good/db")])
        .with_children("/bad", vec![static_secret("/bad/hidden")])
        .failing_list("/bad");

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/", &CancellationToken::new()).await.unwrap();

    assert_eq!(identifiers(&discovery.items), vec!["/good/db"]);
    assert_eq!(discovery.warnings.len(), 1);
    assert!(matches!(
        &discovery.warnings[0],
        DiscoveryWarning::ListFailed { path, .. } if path == "/bad"
    ));
}

#[tokio::test]
async fn test_failing_root_yields_empty_discovery() {
    let store = InMemoryStore::new().failing_list("/");

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/", &CancellationToken::new()).await.unwrap();

    assert!(discovery.items.is_empty());
    assert_eq!(discovery.warnings.len(), 1);
}

#[tokio::test]
async fn test_unrecognized_items_are_skipped_with_warning() {
    let store = InMemoryStore::new().with_children(
        "/app",
        vec![
            static_secret("/app/db"),
            ListedItem::new("/app/cert", "certificate"),
            ListedItem::new("/app/rotated", "ROTATED-SECRET"),
            ListedItem::new("/app/Folder", "Folder"),
        ],
    );

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/app", &CancellationToken::new()).await.unwrap();

    assert_eq!(identifiers(&discovery.items), vec!["/app/db", "/app/rotated"]);
    assert_eq!(
        discovery.warnings,
        vec![
            DiscoveryWarning::Unrecognized {
                name: "/app/cert".to_string(),
                item_type: "certificate".to_string(),
            },
            DiscoveryWarning::Unrecognized {
                name: "/app/Folder".to_string(),
                item_type: "Folder".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_revisited_container_is_not_listed_twice() {
    // /loop lists itself back and a trailing-slash alias of /app
    let store = Arc::new(
        InMemoryStore::new()
            .with_children("/app", vec![folder("/app/loop")])
            .with_children(
                "/app/loop",
                vec![
                    folder("/app/loop"),
                    folder("/app/"),
                    static_secret("/app/loop/key"),
                ],
            ),
    );

    let discovery = TreeDiscoverer::new(store.clone())
        .discover("/app", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(identifiers(&discovery.items), vec!["/app/loop/key"]);
    assert_eq!(
        store.list_calls(),
        vec![Some("/app".to_string()), Some("/app/loop".to_string())]
    );
    assert_eq!(
        discovery.warnings,
        vec![
            DiscoveryWarning::Revisited {
                path: "/app/loop".to_string()
            },
            DiscoveryWarning::Revisited {
                path: "/app/".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_duplicate_secret_reported_once() {
    let store = InMemoryStore::new()
        .with_children("/", vec![folder("/a"), static_secret("/a/shared")])
        .with_children("/a", vec![static_secret("/a/shared")]);

    let discoverer = TreeDiscoverer::new(Arc::new(store));
    let discovery = discoverer.discover("/", &CancellationToken::new()).await.unwrap();

    assert_eq!(identifiers(&discovery.items), vec!["/a/shared"]);
}

#[tokio::test]
async fn test_empty_namespace() {
    let discoverer = TreeDiscoverer::new(Arc::new(InMemoryStore::new()));
    let discovery = discoverer.discover("/", &CancellationToken::new()).await.unwrap();

    assert!(discovery.items.is_empty());
    assert!(discovery.warnings.is_empty());
    assert_eq!(discovery.containers_visited, 1);
}

#[tokio::test]
async fn test_cancelled_discovery_fails() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let discoverer = TreeDiscoverer::new(Arc::new(InMemoryStore::new()));
    let err = discoverer.discover("/", &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
}
