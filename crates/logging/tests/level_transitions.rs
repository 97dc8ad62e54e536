//! Integration tests for level transitions.
//!
//! These tests verify how SetLevel-style calls validate their input and how
//! each transition resets the debug channel, including after an explicit
//! redirect.

use logging::{Channel, Facility, LEVEL_NAMES, Level};
use logging_sink::{LineFormat, MemoryBuffer, Timestamp};

fn captured() -> (Facility, MemoryBuffer) {
    let out = MemoryBuffer::new();
    let facility = Facility::builder()
        .standard_output(out.shared())
        .standard_error(out.shared())
        .line_format(LineFormat::default().with_timestamp(Timestamp::None))
        .build();
    (facility, out)
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Verifies a fresh facility starts in Normal with debug muted.
#[test]
fn fresh_facility_is_normal() {
    let (facility, out) = captured();
    assert_eq!(facility.current_level(), Level::Normal);

    facility.debug("nobody hears this").unwrap();
    assert!(out.is_empty());
}

/// Verifies every accepted name round-trips through set_level.
#[test]
fn every_accepted_name_is_applied() {
    let (facility, _out) = captured();
    for name in LEVEL_NAMES {
        facility.set_level(name).unwrap();
        assert_eq!(facility.current_level().name(), name);
    }
}

/// Verifies rejected values report themselves and the accepted names.
#[test]
fn rejected_value_reports_allowed_names() {
    let (facility, _out) = captured();
    let error = facility.set_level("VERBOSE").unwrap_err();

    let invalid = error.invalid_level().expect("invalid level cause");
    assert_eq!(invalid.rejected(), "VERBOSE");
    assert_eq!(invalid.allowed(), &LEVEL_NAMES);
    assert_eq!(
        invalid.to_string(),
        "got incorrect log level: 'VERBOSE', expected one of: 'NORMAL', 'DEVEL'"
    );
}

/// Verifies an empty level name is rejected.
#[test]
fn empty_value_is_rejected() {
    let (facility, _out) = captured();
    assert!(facility.set_level("").is_err());
}

/// Verifies names differing only in case are rejected without a transition.
#[test]
fn differently_cased_names_are_rejected() {
    let (facility, out) = captured();

    for name in ["devel", "Devel", "normal"] {
        let error = facility.set_level(name).unwrap_err();
        assert_eq!(error.invalid_level().map(|e| e.rejected()), Some(name));
    }

    assert_eq!(facility.current_level(), Level::Normal);
    assert!(facility.destination(Channel::Debug).is_discard());
    facility.debug("still muted").unwrap();
    assert!(out.is_empty());
}

/// Verifies a rejected value in Devel keeps debug output flowing.
#[test]
fn rejected_value_keeps_devel_routing() {
    let (facility, out) = captured();
    facility.set_level("DEVEL").unwrap();

    assert!(facility.set_level("QUIET").is_err());
    assert_eq!(facility.current_level(), Level::Devel);

    facility.debug("still here").unwrap();
    assert_eq!(out.lines(), vec!["DEBUG: still here"]);
}

// ============================================================================
// Debug Routing Tests
// ============================================================================

/// Verifies Normal then Devel then Normal toggles debug output.
#[test]
fn debug_follows_level_round_trip() {
    let (facility, out) = captured();

    facility.debug("one").unwrap();
    facility.apply_level(Level::Devel);
    facility.debug("two").unwrap();
    facility.apply_level(Level::Normal);
    facility.debug("three").unwrap();

    assert_eq!(out.lines(), vec!["DEBUG: two"]);
}

/// Verifies leaving Devel mutes debug even after a redirect.
#[test]
fn transition_to_normal_overrides_redirect() {
    let (facility, _out) = captured();
    let sink = MemoryBuffer::new();
    facility.apply_level(Level::Devel);
    facility.redirect(sink.shared(), sink.shared(), sink.shared(), sink.shared());

    facility.apply_level(Level::Normal);
    facility.debug("after transition").unwrap();

    assert!(sink.is_empty());
    assert!(facility.destination(Channel::Debug).is_discard());
}

/// Verifies re-entering Devel resets debug to standard output.
#[test]
fn repeated_devel_transition_resets_debug() {
    let (facility, out) = captured();
    let sink = MemoryBuffer::new();
    facility.apply_level(Level::Devel);
    facility.redirect(sink.shared(), sink.shared(), sink.shared(), sink.shared());

    facility.apply_level(Level::Devel);
    facility.debug("back on stdout").unwrap();

    assert!(sink.is_empty());
    assert_eq!(out.lines(), vec!["DEBUG: back on stdout"]);
}

/// Verifies transitions leave the redirected non-debug channels alone.
#[test]
fn transition_keeps_other_redirects() {
    let (facility, out) = captured();
    let info = MemoryBuffer::new();
    facility.redirect(info.shared(), info.shared(), info.shared(), info.shared());

    facility.apply_level(Level::Devel);
    facility.info("kept").unwrap();

    assert_eq!(info.lines(), vec!["INFO: kept"]);
    assert!(out.is_empty());
}
