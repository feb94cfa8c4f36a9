//! Tests for the search CLI command

use crate::common::TestEnv;
use folio::cli::commands::search::{execute, SearchArgs};
use folio::cli::OutputFormat;
use folio::core::error::FolioError;

fn args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        persist_dir: None,
        k: Some(3),
    }
}

/// Test searching a built index (human output)
#[tokio::test]
async fn test_search_human() {
    let env = TestEnv::new();
    env.build_index().await;

    let result = execute(args("warranty claim"), &env.services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Search should succeed: {:?}", result.err());
}

/// Test searching with JSON output and explicit persist dir
#[tokio::test]
async fn test_search_json_explicit_dir() {
    let env = TestEnv::new();
    env.build_index().await;

    let args = SearchArgs {
        persist_dir: Some(env.persist_dir.clone()),
        ..args("filter")
    };
    let result = execute(args, &env.services, OutputFormat::Json).await;
    assert!(result.is_ok());
}

/// Searching before building tells the user to build first
#[tokio::test]
async fn test_search_without_index() {
    let env = TestEnv::new();

    let err = execute(args("warranty"), &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("folio build-index"));
}

/// Empty query is rejected
#[tokio::test]
async fn test_search_empty_query() {
    let env = TestEnv::new();
    env.build_index().await;

    let err = execute(args("  "), &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FolioError>(),
        Some(FolioError::InvalidQuery(_))
    ));
}
