use crate::{
    CoreError,
    capture::{EncodingDescriptor, default_encodings, select_encoding},
};

use std::cell::Cell;

/// WHAT: The first supported candidate wins
/// WHY: Candidates are ordered by preference; later ones are fallbacks
#[test]
#[allow(clippy::unwrap_used)]
fn given_several_supported_candidates_when_selecting_then_highest_priority_chosen() {
    // Given: Default candidates with ogg and wav supported
    let candidates = default_encodings();
    let supported = ["audio/ogg;codecs=opus", "audio/wav"];

    // When: Selecting an encoding
    let choice = select_encoding(&candidates, |m| supported.contains(&m)).unwrap();

    // Then: Ogg is chosen over wav
    assert_eq!(choice.mime_type(), "audio/ogg;codecs=opus");
    assert_eq!(choice.suffix(), "ogg");
}

/// WHAT: Probing stops at the first match
/// WHY: Negotiation is a pure query with no need to probe the tail
#[test]
#[allow(clippy::unwrap_used)]
fn given_first_candidate_supported_when_selecting_then_only_one_probe() {
    // Given: A probe that counts calls and supports everything
    let probes = Cell::new(0);
    let candidates = default_encodings();

    // When: Selecting
    let choice = select_encoding(&candidates, |_| {
        probes.set(probes.get() + 1);
        true
    })
    .unwrap();

    // Then: Only the first candidate was probed
    assert_eq!(probes.get(), 1);
    assert_eq!(choice.suffix(), "webm");
}

/// WHAT: No supported candidate yields NoEncodingSupported
/// WHY: The caller must surface a terminal error for the attempt
#[test]
fn given_nothing_supported_when_selecting_then_no_encoding_supported() {
    // Given: A probe that rejects everything
    let candidates = vec![EncodingDescriptor::new("audio/flac", "flac")];

    // When: Selecting
    let result = select_encoding(&candidates, |_| false);

    // Then: The error lists the probed candidates
    assert!(matches!(
        &result,
        Err(CoreError::NoEncodingSupported { candidates, .. })
            if candidates == &vec!["audio/flac".to_string()]
    ));
}

/// WHAT: An empty candidate list is unsupported
/// WHY: Edge case for misconfigured priority lists
#[test]
fn given_empty_candidates_when_selecting_then_no_encoding_supported() {
    // Given/When: Selecting from nothing
    let result = select_encoding(&[], |_| true);

    // Then: NoEncodingSupported
    assert!(matches!(result, Err(CoreError::NoEncodingSupported { .. })));
}
