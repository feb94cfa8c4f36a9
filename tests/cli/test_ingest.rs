//! Tests for the ingest CLI command
//!
//! - Explicit and default document path
//! - Parameter overrides, including negative values
//! - Missing documents

use crate::common::TestEnv;
use folio::cli::commands::ingest::{execute, IngestArgs};
use folio::cli::OutputFormat;
use folio::core::error::FolioError;

fn args(env: &TestEnv) -> IngestArgs {
    IngestArgs {
        path: Some(env.manual.clone()),
        chunk_size: None,
        overlap: None,
        preview: Some(2),
    }
}

fn folio_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a FolioError> {
    err.downcast_ref::<FolioError>()
}

/// Test ingesting with configured parameters (human output)
#[tokio::test]
async fn test_ingest_human() {
    let env = TestEnv::new();
    let result = execute(args(&env), &env.services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Ingest should succeed: {:?}", result.err());
    assert_eq!(env.loader.calls(), vec![env.manual.clone()]);
}

/// Test ingesting with JSON output
#[tokio::test]
async fn test_ingest_json() {
    let env = TestEnv::new();
    let result = execute(args(&env), &env.services, OutputFormat::Json).await;
    assert!(result.is_ok());
}

/// Without --path the first PDF in the data directory is used
#[tokio::test]
async fn test_ingest_default_path() {
    let env = TestEnv::new();
    let args = IngestArgs {
        path: None,
        ..args(&env)
    };

    execute(args, &env.services, OutputFormat::Json)
        .await
        .unwrap();
    assert_eq!(env.loader.calls(), vec![env.manual.clone()]);
}

/// Negative overlap is rejected before the document is read
#[tokio::test]
async fn test_ingest_negative_overlap() {
    let env = TestEnv::new();
    let args = IngestArgs {
        overlap: Some(-1),
        ..args(&env)
    };

    let err = execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(matches!(
        folio_error(err.as_ref()),
        Some(FolioError::InvalidParameter(_))
    ));
    assert!(env.loader.calls().is_empty());
}

/// Overlap equal to chunk size is rejected
#[tokio::test]
async fn test_ingest_overlap_equals_chunk_size() {
    let env = TestEnv::new();
    let args = IngestArgs {
        chunk_size: Some(100),
        overlap: Some(100),
        ..args(&env)
    };

    let err = execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(matches!(
        folio_error(err.as_ref()),
        Some(FolioError::InvalidParameter(_))
    ));
}

/// A path the loader does not know is reported as not found
#[tokio::test]
async fn test_ingest_missing_file() {
    let env = TestEnv::new();
    let args = IngestArgs {
        path: Some(env.data_dir.join("missing.pdf")),
        ..args(&env)
    };

    let err = execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(folio_error(err.as_ref()).is_some_and(|e| e.is_not_found()));
}

/// Empty data directory and no --path
#[tokio::test]
async fn test_ingest_no_pdf_in_data_dir() {
    let env = TestEnv::new();
    std::fs::remove_file(&env.manual).unwrap();
    let args = IngestArgs {
        path: None,
        ..args(&env)
    };

    let err = execute(args, &env.services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(matches!(
        folio_error(err.as_ref()),
        Some(FolioError::FileNotFound(_))
    ));
}
