// Ingest pipeline tests
//
// Runs the load -> normalize -> chunk chain over the manual fixture
// and checks the chunk records that come out.

use crate::common::{manual_pages, TestEnv};
use folio::core::error::FolioError;
use folio::core::ingest::{chunk, find_first_pdf, normalize, resolve_document};

#[test]
fn test_ingest_manual_counts() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let (chunks, stats) = pipeline.ingest(&env.manual).unwrap();

    assert_eq!(stats.pages, 4);
    assert_eq!(stats.empty_pages, 1);
    assert_eq!(stats.chunks_created, 9);
    assert_eq!(stats.characters, 435);
    assert_eq!(chunks.len(), 9);
    assert_eq!(env.loader.calls(), vec![env.manual.clone()]);
}

#[test]
fn test_ingest_chunk_ids_and_pages() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let (chunks, _) = pipeline.ingest(&env.manual).unwrap();
    let ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();

    // Page 2 is blank and contributes nothing
    assert_eq!(
        ids,
        ["1-0", "1-1", "3-0", "3-1", "3-2", "3-3", "4-0", "4-1", "4-2"]
    );
    for c in &chunks {
        assert!(c.chunk_id.starts_with(&format!("{}-", c.page)));
        assert_eq!(c.source, env.manual.display().to_string());
    }
}

#[test]
fn test_ingest_page_of_exactly_chunk_size_gets_tail_chunk() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let (chunks, _) = pipeline.ingest(&env.manual).unwrap();

    assert_eq!(
        chunks[0].text,
        "Safety Instructions Read all warnings before use. Keep the unit away from water."
    );
    assert_eq!(chunks[1].text, "nit away from water.");
}

#[test]
fn test_ingest_chunks_are_normalized() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let (chunks, _) = pipeline.ingest(&env.manual).unwrap();

    for c in &chunks {
        assert!(!c.text.is_empty());
        assert!(c.text.chars().count() <= 80);
        assert!(!c.text.contains('\n'));
        assert!(!c.text.contains('\t'));
        assert!(!c.text.contains("  "));
    }
}

#[test]
fn test_ingest_overlap_matches_previous_tail() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let (chunks, _) = pipeline.ingest(&env.manual).unwrap();
    let page3: Vec<&str> = chunks
        .iter()
        .filter(|c| c.page == 3)
        .map(|c| c.text.as_str())
        .collect();

    for pair in page3.windows(2) {
        let tail: String = pair[0].chars().skip(60).collect();
        assert!(pair[1].starts_with(&tail), "{:?} -> {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_ingest_matches_direct_chunking() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();
    let (via_pipeline, _) = pipeline.ingest(&env.manual).unwrap();

    let source = env.manual.display().to_string();
    let normalized: Vec<String> = manual_pages().iter().map(|p| normalize(p)).collect();
    let direct = chunk(&normalized, 80, 20, &source).unwrap();

    assert_eq!(via_pipeline, direct);
}

#[test]
fn test_ingest_invalid_parameters_never_load() {
    let env = TestEnv::new();

    for (size, overlap) in [(0, 0), (-10, 0), (100, 100), (100, 150), (100, -1)] {
        let err = env.services.create_pipeline(size, overlap).unwrap_err();
        assert!(
            matches!(err, FolioError::InvalidParameter(_)),
            "({size}, {overlap}) gave {err:?}"
        );
    }
    assert!(env.loader.calls().is_empty());
}

#[test]
fn test_ingest_missing_document() {
    let env = TestEnv::new();
    let pipeline = env.services.create_pipeline(80, 20).unwrap();

    let err = pipeline
        .ingest(&env.data_dir.join("other.pdf"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_resolve_document_defaults_to_data_dir() {
    let env = TestEnv::new();

    assert_eq!(find_first_pdf(&env.data_dir).unwrap(), env.manual);
    assert_eq!(resolve_document(None, &env.data_dir).unwrap(), env.manual);

    let explicit = env.data_dir.join("elsewhere.pdf");
    assert_eq!(
        resolve_document(Some(explicit.as_path()), &env.data_dir).unwrap(),
        explicit
    );
}

#[test]
fn test_find_first_pdf_picks_sorted_first() {
    let env = TestEnv::new();
    std::fs::write(env.data_dir.join("a_intro.pdf"), b"").unwrap();
    std::fs::write(env.data_dir.join("notes.txt"), b"").unwrap();

    assert_eq!(
        find_first_pdf(&env.data_dir).unwrap(),
        env.data_dir.join("a_intro.pdf")
    );
}

#[test]
fn test_find_first_pdf_empty_dir() {
    let temp = tempfile::tempdir().unwrap();
    let err = find_first_pdf(temp.path()).unwrap_err();
    assert!(matches!(err, FolioError::FileNotFound(_)));
}
