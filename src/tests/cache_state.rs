// Unit Tests for Cache State
//
// UNIT UNDER TEST: CacheState
//
// BUSINESS RESPONSIBILITY:
//   - Records which prefix of the conversation was already sent
//   - Computes the new suffix of each turn by position
//   - Rejects histories shorter than the recorded prefix
//
// TEST COVERAGE:
//   - Diff on empty state and after commits
//   - Precondition violation leaves the state untouched
//   - Commit appends in order

use crate::caching::CacheState;
use crate::core_types::messages::Message;
use crate::error::LlmError;
use crate::tests::helpers::three_turn_history;

#[cfg(test)]
mod diff_tests {
    use super::*;

    #[test]
    fn test_empty_state_treats_whole_conversation_as_new() {
        let state = CacheState::new();
        let history = three_turn_history();

        let new = state.diff_new(&history).unwrap();

        assert_eq!(new, history.as_slice());
        assert!(state.is_empty());
    }

    #[test]
    fn test_diff_returns_suffix_after_commit() {
        let mut state = CacheState::new();
        let mut history = three_turn_history();
        state.commit(&history);

        history.push(Message::assistant("Here they are"));
        history.push(Message::user("Thanks"));

        let new = state.diff_new(&history).unwrap();

        assert_eq!(new.len(), 2);
        assert_eq!(new[1], Message::user("Thanks"));
    }

    #[test]
    fn test_greeting_exchange_then_new_question() {
        let mut state = CacheState::new();
        state.commit(&[Message::user("hi"), Message::assistant("hello")]);
        let conversation = vec![
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("how are you"),
        ];

        let new = state.diff_new(&conversation).unwrap();
        assert_eq!(new, [Message::user("how are you")].as_slice());

        state.commit(new);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_same_length_history_has_no_new_messages() {
        let mut state = CacheState::new();
        let history = three_turn_history();
        state.commit(&history);

        let new = state.diff_new(&history).unwrap();

        assert!(new.is_empty());
    }

    #[test]
    fn test_shorter_history_is_precondition_violation() {
        let mut state = CacheState::new();
        let history = three_turn_history();
        state.commit(&history);
        let before = state.clone();

        let result = state.diff_new(&history[..1]);

        match result {
            Err(LlmError::PreconditionViolation { cached, supplied }) => {
                assert_eq!(cached, 3);
                assert_eq!(supplied, 1);
            }
            other => panic!("expected precondition violation, got {other:?}"),
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_rewritten_history_of_same_length_is_not_detected() {
        // Comparison is positional; edited content in the prefix passes through
        let mut state = CacheState::new();
        state.commit(&[Message::user("original")]);

        let rewritten = vec![Message::user("edited"), Message::assistant("reply")];
        let new = state.diff_new(&rewritten).unwrap();

        assert_eq!(new, &rewritten[1..]);
    }
}

#[cfg(test)]
mod commit_tests {
    use super::*;

    #[test]
    fn test_commit_appends_in_order() {
        let mut state = CacheState::new();
        let history = three_turn_history();

        state.commit(&history[..1]);
        state.commit(&history[1..]);

        assert_eq!(state.len(), 3);
        assert_eq!(state.cached(), history.as_slice());
    }

    #[test]
    fn test_commit_of_nothing_is_noop() {
        let mut state = CacheState::new();

        state.commit(&[]);

        assert!(state.is_empty());
    }
}
