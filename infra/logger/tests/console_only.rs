use atlas_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("integration-console-only")
        .level(LevelFilter::INFO)
        .init()
        .expect("logger should initialize");

    tracing::info!(destinations = 3, "catalog loaded");
    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
