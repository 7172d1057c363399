//! Property-based tests for the typewriter state machine
//!
//! Uses proptest to verify the cursor invariants over arbitrary phrase lists.

use proptest::prelude::*;
use folio_core::{Typewriter, TypingTiming};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Generate phrase lists with mixed-width characters, empty phrases allowed
fn roles_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-zA-Z &é✓-]{0,24}").expect("valid regex"),
        1..6,
    )
}

fn writer(roles: Vec<String>) -> Typewriter {
    Typewriter::new(roles, TypingTiming::default()).expect("non-empty roles")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Displayed length never exceeds the phrase it was cut from
    #[test]
    fn chars_within_phrase_bounds(roles in roles_strategy(), ticks in 0usize..400) {
        let mut tw = writer(roles.clone());
        for _ in 0..ticks {
            let frame = tw.tick();
            let phrase = &roles[frame.role];
            prop_assert!(frame.chars <= phrase.chars().count());
            prop_assert_eq!(frame.text.chars().count(), frame.chars);
            prop_assert!(phrase.starts_with(&frame.text));

            let cursor = tw.cursor();
            prop_assert!(cursor.role < roles.len());
            prop_assert!(cursor.chars <= roles[cursor.role].chars().count());
        }
    }

    /// One full phrase cycle ends at zero characters on the next phrase
    #[test]
    fn cycle_lands_on_next_phrase(roles in roles_strategy()) {
        let mut tw = writer(roles.clone());
        for (index, phrase) in roles.iter().enumerate() {
            let len = phrase.chars().count();
            // An empty phrase still takes one typing and one deleting tick.
            let ticks = 2 * len.max(1);
            for _ in 0..ticks {
                tw.tick();
            }
            let cursor = tw.cursor();
            prop_assert_eq!(cursor.chars, 0);
            prop_assert!(!cursor.deleting);
            prop_assert_eq!(cursor.role, (index + 1) % roles.len());
        }
    }

    /// Delays only ever take the four configured values
    #[test]
    fn delays_are_phase_values(roles in roles_strategy(), ticks in 1usize..200) {
        let timing = TypingTiming::default();
        let allowed = [
            timing.type_delay(),
            timing.delete_delay(),
            timing.hold_delay(),
            timing.advance_delay(),
        ];
        for frame in writer(roles).take(ticks) {
            prop_assert!(allowed.contains(&frame.delay));
        }
    }
}
