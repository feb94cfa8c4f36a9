// Index build tests
//
// Builds an index from the manual fixture with the hashing embedder and
// checks what lands on disk.

use crate::common::{TestEnv, TEST_DIMS};
use folio::core::config::EmbeddingConfig;
use folio::core::error::FolioError;
use folio::core::index::{build_index_from_pdf, to_nodes};
use folio::core::storage::SCHEMA_VERSION;
use serial_test::serial;

#[tokio::test]
async fn test_build_index_stats() {
    let env = TestEnv::new();
    let stats = env.build_index().await;

    assert_eq!(stats.pages, 4);
    assert_eq!(stats.chunks_created, 9);
    assert_eq!(stats.nodes_stored, 9);
    assert_eq!(stats.dimensions, TEST_DIMS);
    assert_eq!(stats.persist_dir, env.persist_dir);
    assert_eq!(stats.source, env.manual.display().to_string());
}

#[tokio::test]
async fn test_persisted_index_round_trips_nodes() {
    let env = TestEnv::new();
    env.build_index().await;

    let pipeline = env.services.create_pipeline(80, 20).unwrap();
    let (chunks, _) = pipeline.ingest(&env.manual).unwrap();
    let expected = to_nodes(&chunks);

    let (index, metadata) = env.store().load().unwrap();
    assert_eq!(index.nodes(), expected.as_slice());
    assert_eq!(index.dimensions(), TEST_DIMS);

    assert_eq!(metadata.node_count, 9);
    assert_eq!(metadata.pages, 4);
    assert_eq!(metadata.chunk_size, 80);
    assert_eq!(metadata.overlap, 20);
    assert_eq!(metadata.schema_version, SCHEMA_VERSION);
    assert_eq!(metadata.embedding, EmbeddingConfig::hashing(TEST_DIMS));
}

#[tokio::test]
async fn test_node_metadata_matches_chunks() {
    let env = TestEnv::new();
    env.build_index().await;

    let (index, _) = env.store().load().unwrap();
    for node in index.nodes() {
        assert_eq!(node.id, node.metadata.chunk_id);
        assert!(node
            .metadata
            .chunk_id
            .starts_with(&format!("{}-", node.metadata.page)));
        assert_eq!(node.metadata.source, env.manual.display().to_string());
    }
}

#[tokio::test]
async fn test_rebuild_replaces_previous_index() {
    let env = TestEnv::new();
    env.build_index().await;

    let pipeline = env.services.create_pipeline(200, 0).unwrap();
    let (_index, stats) = build_index_from_pdf(
        &pipeline,
        &env.manual,
        &env.persist_dir,
        &EmbeddingConfig::hashing(TEST_DIMS),
    )
    .await
    .unwrap();

    // 80 + 233 + 122 chars at 200/0
    assert_eq!(stats.nodes_stored, 4);
    let (_, metadata) = env.store().load().unwrap();
    assert_eq!(metadata.node_count, 4);
    assert_eq!(metadata.chunk_size, 200);
}

#[tokio::test]
async fn test_build_missing_document_persists_nothing() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let err = build_index_from_pdf(
        &pipeline,
        &env.data_dir.join("missing.pdf"),
        &env.persist_dir,
        &EmbeddingConfig::hashing(TEST_DIMS),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, FolioError::FileNotFound(_)));
    assert!(!env.store().exists());
}

#[tokio::test]
#[serial]
async fn test_build_without_api_key_fails_before_loading() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let embedding = EmbeddingConfig {
        api_key_env: "FOLIO_TEST_UNSET_API_KEY".to_string(),
        ..EmbeddingConfig::default()
    };
    std::env::remove_var(&embedding.api_key_env);

    let err = build_index_from_pdf(&pipeline, &env.manual, &env.persist_dir, &embedding)
        .await
        .unwrap_err();

    assert!(matches!(err, FolioError::MissingCredential(_)));
    assert!(env.loader.calls().is_empty());
    assert!(!env.store().exists());
}
