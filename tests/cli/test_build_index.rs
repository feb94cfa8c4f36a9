//! Tests for the build-index CLI command
//!
//! - Building with the configured hashing provider
//! - Persist directory override
//! - Missing API key for the remote provider
//! - Invalid parameters

use crate::common::TestEnv;
use folio::cli::commands::build_index::{execute, BuildIndexArgs};
use folio::cli::OutputFormat;
use folio::core::config::EmbeddingProvider;
use folio::core::error::FolioError;
use folio::core::storage::IndexStore;
use serial_test::serial;

fn args(env: &TestEnv) -> BuildIndexArgs {
    BuildIndexArgs {
        path: Some(env.manual.clone()),
        chunk_size: None,
        overlap: None,
        persist_dir: None,
        provider: None,
        model: None,
    }
}

/// Test building into the configured persist dir
#[tokio::test]
async fn test_build_index_human() {
    let env = TestEnv::new();

    let result = execute(args(&env), &env.services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());

    let (index, metadata) = env.store().load().unwrap();
    assert_eq!(index.len(), 9);
    assert_eq!(metadata.chunk_size, 80);
    assert_eq!(metadata.overlap, 20);
}

/// Test building with JSON output and parameter overrides
#[tokio::test]
async fn test_build_index_json_with_overrides() {
    let env = TestEnv::new();
    let args = BuildIndexArgs {
        chunk_size: Some(200),
        overlap: Some(0),
        ..args(&env)
    };

    execute(args, &env.services, OutputFormat::Json)
        .await
        .unwrap();

    let (_, metadata) = env.store().load().unwrap();
    assert_eq!(metadata.node_count, 4);
    assert_eq!(metadata.chunk_size, 200);
}

/// --persist-dir overrides the configured directory
#[tokio::test]
async fn test_build_index_custom_persist_dir() {
    let env = TestEnv::new();
    let other = tempfile::tempdir().unwrap();
    let target = other.path().join("custom");
    let args = BuildIndexArgs {
        persist_dir: Some(target.clone()),
        ..args(&env)
    };

    execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(IndexStore::new(&target).exists());
    assert!(!env.store().exists());
}

/// Switching to the remote provider without a key fails before loading
#[tokio::test]
#[serial]
async fn test_build_index_missing_api_key() {
    let env = TestEnv::new();
    let saved = std::env::var("OPENAI_API_KEY").ok();
    std::env::remove_var("OPENAI_API_KEY");

    let args = BuildIndexArgs {
        provider: Some(EmbeddingProvider::OpenAi),
        ..args(&env)
    };
    let result = execute(args, &env.services, OutputFormat::Human).await;

    if let Some(key) = saved {
        std::env::set_var("OPENAI_API_KEY", key);
    }

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FolioError>(),
        Some(FolioError::MissingCredential(_))
    ));
    assert!(env.loader.calls().is_empty());
    assert!(!env.store().exists());
}

/// Invalid chunk size is rejected and nothing is persisted
#[tokio::test]
async fn test_build_index_invalid_chunk_size() {
    let env = TestEnv::new();
    let args = BuildIndexArgs {
        chunk_size: Some(0),
        ..args(&env)
    };

    let err = execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FolioError>(),
        Some(FolioError::InvalidParameter(_))
    ));
    assert!(!env.store().exists());
}
