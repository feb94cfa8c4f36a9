// Search tests
//
// Queries an index built from the manual fixture.

use crate::common::TestEnv;
use folio::core::error::FolioError;

#[tokio::test]
async fn test_search_finds_relevant_page() {
    let env = TestEnv::new();
    env.build_index().await;

    let response = env
        .services
        .search
        .search(&env.store(), "warranty claim serial number", Some(3))
        .await
        .unwrap();

    assert_eq!(response.count, 3);
    assert_eq!(response.results[0].page, 3);
    assert!(response.results[0].chunk_id.starts_with("3-"));
}

#[tokio::test]
async fn test_search_results_ranked() {
    let env = TestEnv::new();
    env.build_index().await;

    let response = env
        .services
        .search
        .search(&env.store(), "rinse the filter", None)
        .await
        .unwrap();

    // default_k from the config
    assert_eq!(response.count, 4);
    for (i, result) in response.results.iter().enumerate() {
        assert_eq!(result.rank, i + 1);
    }
    for pair in response.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(response.results[0].page, 4);
}

#[tokio::test]
async fn test_search_k_clamped_to_index_size() {
    let env = TestEnv::new();
    env.build_index().await;

    let response = env
        .services
        .search
        .search(&env.store(), "water", Some(1000))
        .await
        .unwrap();

    // max_k is 50, the index holds 9 nodes
    assert_eq!(response.count, 9);
}

#[tokio::test]
async fn test_search_empty_query() {
    let env = TestEnv::new();
    env.build_index().await;

    let err = env
        .services
        .search
        .search(&env.store(), "", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::InvalidQuery(_)));
}

#[tokio::test]
async fn test_search_before_build() {
    let env = TestEnv::new();

    let err = env
        .services
        .search
        .search(&env.store(), "warranty", None)
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::IndexNotFound(_)));
}
