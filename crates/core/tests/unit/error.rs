//! # Error Tests
//!
//! Display text and conversions for configuration, format, and replay errors.

use std::io;
use std::path::PathBuf;

use csim_core::common::{ConfigError, ReplayError, TraceFormatError, TraceFormatKind};

#[test]
fn test_config_error_display() {
    assert!(ConfigError::SetIndexBits.to_string().contains("set index bits"));
    assert!(ConfigError::Associativity.to_string().contains("associativity"));
    assert!(ConfigError::BlockOffsetBits.to_string().contains("block offset bits"));
    assert!(
        ConfigError::GeometryTooWide { total: 70 }
            .to_string()
            .contains("70")
    );
    assert!(
        ConfigError::Allocation { lines: 1024 }
            .to_string()
            .contains("1024")
    );
}

#[test]
fn test_trace_source_display_names_path() {
    let err = ConfigError::TraceSource {
        path: PathBuf::from("traces/missing.trace"),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    };
    let text = err.to_string();
    assert!(text.contains("traces/missing.trace"), "{text}");
    assert!(text.contains("no such file"), "{text}");
}

#[test]
fn test_trace_format_error_display() {
    let err = TraceFormatError::new(TraceFormatKind::UnknownOperation('I'), "I 0400d7d4,8")
        .at_line(3);
    assert_eq!(err.line, 3);
    assert_eq!(
        err.to_string(),
        r#"trace line 3: unknown operation 'I': "I 0400d7d4,8""#
    );
}

#[test]
fn test_trace_format_kind_display() {
    let cases = [
        (TraceFormatKind::Truncated, "truncated"),
        (TraceFormatKind::MissingSpace, "space"),
        (TraceFormatKind::MissingComma, "','"),
        (TraceFormatKind::BadAddress, "hexadecimal"),
        (TraceFormatKind::BadSize, "decimal"),
        (TraceFormatKind::ZeroSize, "positive"),
    ];
    for (kind, needle) in cases {
        assert!(kind.to_string().contains(needle), "{kind}");
    }
}

#[test]
fn test_replay_error_conversions() {
    let format: ReplayError =
        TraceFormatError::new(TraceFormatKind::BadSize, "L 10,x").into();
    assert!(matches!(format, ReplayError::Format(_)));
    assert!(format.to_string().contains("L 10,x"));

    let config: ReplayError = ConfigError::Associativity.into();
    assert!(matches!(config, ReplayError::Config(ConfigError::Associativity)));
    assert_eq!(config.to_string(), ConfigError::Associativity.to_string());

    let io_err: ReplayError = io::Error::other("disk gone").into();
    assert!(matches!(io_err, ReplayError::Io(_)));
}
