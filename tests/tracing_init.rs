use marquee::observability::{init_tracing, TRACE_FILE_NAME};
use marquee::Config;

#[test]
fn second_initialization_keeps_the_first_subscriber() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let config = Config {
        trace_level: Some("debug".to_string()),
        ..Config::default()
    };

    init_tracing(&config, first.path());
    init_tracing(&config, second.path());

    tracing::info_span!("after_init").in_scope(|| tracing::info!("inside"));

    let exported = std::fs::read_to_string(first.path().join(TRACE_FILE_NAME)).unwrap();
    assert!(exported.contains("after_init"));
    assert!(!second.path().join(TRACE_FILE_NAME).exists());
}
