//! Property-based tests for rust_event_logger using proptest

use proptest::prelude::*;
use rust_event_logger::prelude::*;

fn emittable_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Notice),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

fn capture(level: LogLevel) -> (EventLogger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = EventLogger::builder()
        .process_level(level)
        .appender(memory.clone())
        .build();
    (logger, memory)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in emittable_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that LogLevel ordering matches the numeric ordering
    #[test]
    fn test_log_level_ordering(a in emittable_level(), b in emittable_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a > b, (a as u8) > (b as u8));
    }

    /// Test that parsing accepts any casing and surrounding whitespace
    #[test]
    fn test_log_level_case_insensitive(level in emittable_level(), lower in any::<bool>()) {
        let name = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = format!("  {}  ", name).parse().unwrap();
        prop_assert_eq!(parsed, level);
    }
}

// ============================================================================
// Filtering Tests
// ============================================================================

proptest! {
    /// An event at `a` is delivered iff `a >= b`, with `b` set as the process level
    #[test]
    fn test_process_level_filtering(a in emittable_level(), b in emittable_level()) {
        let (logger, memory) = capture(b);
        logger.log_event(a, &RequestContext::new(), "e", Vec::new());

        prop_assert_eq!(memory.len(), usize::from(a >= b));
    }

    /// The context override decides, whatever the process level
    #[test]
    fn test_override_filtering(
        a in emittable_level(),
        b in emittable_level(),
        process in emittable_level(),
    ) {
        let (logger, memory) = capture(process);
        let ctx = RequestContext::new().with_level(b);
        logger.log_event(a, &ctx, "e", Vec::new());

        prop_assert_eq!(logger.effective_level(&ctx), b);
        prop_assert_eq!(memory.len(), usize::from(a >= b));
    }
}

// ============================================================================
// Encoder Tests
// ============================================================================

proptest! {
    #[test]
    fn test_signed_integers_render_full_width(v in any::<i64>()) {
        prop_assert_eq!(PayloadValue::from(v).to_text(), v.to_string());
    }

    #[test]
    fn test_unsigned_integers_render_full_width(v in any::<u64>()) {
        prop_assert_eq!(PayloadValue::from(v).to_text(), v.to_string());
    }

    /// Finite floats in range truncate toward zero
    #[test]
    fn test_float_truncation(v in -1.0e15_f64..1.0e15_f64) {
        let rendered: i64 = PayloadValue::from(v).to_text().parse().unwrap();
        prop_assert_eq!(rendered as f64, v.trunc());
    }

    /// Text is passed through unchanged
    #[test]
    fn test_text_passthrough(s in ".*") {
        prop_assert_eq!(PayloadValue::from(s.as_str()).to_text(), s);
    }
}

// ============================================================================
// Payload Tests
// ============================================================================

proptest! {
    /// Every payload becomes ceil(n / 2) pairs, keys in call order
    #[test]
    fn test_payload_pairing(keys in prop::collection::vec("[a-z]{1,8}", 0..12)) {
        let (logger, memory) = capture(LogLevel::Trace);
        let kv: Vec<PayloadValue> = keys.iter().map(PayloadValue::from).collect();

        logger.info(&RequestContext::new(), "e", kv);

        let record = &memory.records()[0];
        prop_assert_eq!(record.payload.len(), keys.len().div_ceil(2));
        for (i, (key, _)) in record.payload.iter().enumerate() {
            prop_assert_eq!(key, &keys[i * 2]);
        }
        if keys.len() % 2 == 1 {
            prop_assert_eq!(&record.payload.last().unwrap().1, "");
        }
    }

    /// Log ids survive emission unchanged
    #[test]
    fn test_log_id_preserved(id in "[A-Za-z0-9-]{0,32}") {
        let (logger, memory) = capture(LogLevel::Trace);
        let ctx = RequestContext::new().with_log_id(&id);

        logger.warn(&ctx, "e", Vec::new());

        prop_assert_eq!(&memory.records()[0].log_id, &id);
    }
}
