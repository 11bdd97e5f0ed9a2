//! Preference Resolver
//!
//! Picks one instance out of the candidates a single backend produced for a
//! single-result lookup. The policy is a naming convention, not
//! configuration: candidates whose implementation identifier contains
//! `"default"` (any case) are [`Preference::Fallback`] and lose to every
//! [`Preference::Preferred`] candidate.
//!
//! Within a rank, the first candidate in discovery order wins.

use lookup_domain::value_objects::{Candidate, Preference};

/// Choose the preferred candidate.
///
/// # Panics
///
/// `candidates` must not be empty. Callers establish non-emptiness first and
/// treat an empty result as "not found" without calling the resolver; an
/// empty input is a bug in the caller.
pub fn select_preferred(mut candidates: Vec<Candidate>) -> Candidate {
    assert!(
        !candidates.is_empty(),
        "select_preferred requires at least one candidate"
    );

    // With no preferred candidate every entry is a fallback, so index 0 is
    // the first-seen fallback.
    let chosen = candidates
        .iter()
        .position(|candidate| candidate.preference() == Preference::Preferred)
        .unwrap_or(0);
    candidates.swap_remove(chosen)
}
