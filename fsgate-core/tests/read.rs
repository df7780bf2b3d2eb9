use fsgate_core::file::access::{ReadRequest, BINARY_FALLBACK_MARKER};
use fsgate_core::settings::ReaderConfig;
use fsgate_core::telemetry::TelemetryEvent;


use fixture::{numbered_lines, Fixture};

/// 13 bytes per line; comfortably above the default 10 MiB threshold.
const LARGE_LINE_COUNT: usize = 900_000;

#[tokio::test]
async fn test_tail_of_large_file_with_default_config() {
    let fixture = Fixture::new();
    fixture.write("big.log", numbered_lines(LARGE_LINE_COUNT));
    let manager = fixture.manager();

    let result = manager
        .read_file(&ReadRequest::new(fixture.path("big.log")).offset(-3).raw())
        .await
        .unwrap();

    assert_eq!(
        result.content,
        "line 0899997\nline 0899998\nline 0899999"
    );
    assert!(fixture.telemetry.events().iter().any(|e| matches!(
        e,
        TelemetryEvent::ReadCompleted {
            strategy: "tail_chunk",
            lines: 3,
            ..
        }
    )));
}

#[tokio::test]
async fn test_deep_read_of_large_file_is_approximate() {
    let fixture = Fixture::new();
    fixture.write("big.log", numbered_lines(LARGE_LINE_COUNT));
    let manager = fixture.manager();

    let result = manager
        .read_file(
            &ReadRequest::new(fixture.path("big.log"))
                .offset(500_000)
                .length(2),
        )
        .await
        .unwrap();

    assert_eq!(
        result.content,
        "[Reading ~2 lines from estimated position near line 500000 (approximate)]\n\nline 0500000\nline 0500001"
    );
}

#[tokio::test]
async fn test_long_tail_of_large_file_uses_ring_buffer() {
    let fixture = Fixture::new();
    let reader = ReaderConfig {
        large_file_threshold: 1024,
        ..ReaderConfig::default()
    };
    fixture.write("mid.log", numbered_lines(2_000));
    let manager = fixture.manager_with_reader(reader);

    let result = manager
        .read_file(
            &ReadRequest::new(fixture.path("mid.log"))
                .offset(-150)
                .length(2),
        )
        .await
        .unwrap();

    // the length cap keeps the file's final lines
    assert_eq!(
        result.content,
        "[Reading last 2 lines (total: 2000 lines)]\n\nline 0001998\nline 0001999"
    );
}

#[tokio::test]
async fn test_length_caps_tail_from_the_end() {
    let fixture = Fixture::new();
    fixture.write("big.log", numbered_lines(LARGE_LINE_COUNT));
    let manager = fixture.manager();

    let result = manager
        .read_file(
            &ReadRequest::new(fixture.path("big.log"))
                .offset(-50)
                .length(2),
        )
        .await
        .unwrap();

    assert_eq!(
        result.content,
        "[Reading last 2 lines]\n\nline 0899998\nline 0899999"
    );
}

#[tokio::test]
async fn test_every_strategy_agrees_on_tails() {
    let fixture = Fixture::new();
    let content = "first\r\nsecond\n\nfourth\r\nfifth";
    fixture.write("mixed.txt", content);
    let expected: Vec<&str> = content.lines().collect();

    for threshold in [0u64, 1 << 20] {
        for max_chunk_lines in [0usize, 100] {
            let manager = fixture.manager_with_reader(ReaderConfig {
                large_file_threshold: threshold,
                tail_chunk_max_lines: max_chunk_lines,
                chunk_size: 4,
                ..ReaderConfig::default()
            });
            for n in 1..=6usize {
                let result = manager
                    .read_file(
                        &ReadRequest::new(fixture.path("mixed.txt"))
                            .offset(-(n as i64))
                            .raw(),
                    )
                    .await
                    .unwrap();
                let start = expected.len().saturating_sub(n);
                assert_eq!(
                    result.content,
                    expected[start..].join("\n"),
                    "threshold={threshold} max_chunk_lines={max_chunk_lines} n={n}"
                );
            }
        }
    }
}

#[tokio::test]
async fn test_head_annotation_reports_remaining() {
    let fixture = Fixture::new();
    fixture.write("short.txt", numbered_lines(10));

    let result = fixture
        .manager()
        .read_file(&ReadRequest::new(fixture.path("short.txt")).offset(4).length(20))
        .await
        .unwrap();

    assert!(result
        .content
        .starts_with("[Reading 6 lines from line 4 (total: 10 lines, 0 remaining)]\n\nline 0000004"));
}

#[tokio::test]
async fn test_undecodable_text_falls_back_to_base64() {
    let fixture = Fixture::new();
    fixture.write("latin1.txt", [b'c', b'a', b'f', 0xe9, b'\n']);

    let result = fixture
        .manager()
        .read_file(&ReadRequest::new(fixture.path("latin1.txt")))
        .await
        .unwrap();

    assert!(result.is_binary);
    assert!(!result.is_image);
    assert!(result.content.starts_with(BINARY_FALLBACK_MARKER));
    assert!(fixture
        .telemetry
        .events()
        .contains(&TelemetryEvent::BinaryFallback {
            extension: "txt".to_string(),
            file_size: 5,
        }));
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let fixture = Fixture::new();

    let err = fixture
        .manager()
        .read_file(&ReadRequest::new(fixture.path("nope.txt")))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "NOT_FOUND");
}
