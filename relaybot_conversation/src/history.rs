//! The rolling message window for one user.

use relaybot_core::{ConversationTurn, Role};

/// Ordered sequence of turns for one user.
///
/// Once seeded, the first element is a single `system` turn carrying the
/// persona prompt. Trimming keeps the most recent turns; whether the seed
/// turn survives trimming is the caller's choice (`pin_seed`).
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Install the persona prompt if nothing has been stored yet.
    pub fn seed_if_empty(&mut self, system_prompt: &str) {
        if self.turns.is_empty() {
            self.turns.push(ConversationTurn::system(system_prompt));
        }
    }

    /// Drop everything and restore the single seed turn.
    pub fn reset(&mut self, system_prompt: &str) {
        self.turns.clear();
        self.turns.push(ConversationTurn::system(system_prompt));
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Tail-trim to at most `limit` turns, dropping the oldest first.
    ///
    /// With `pin_seed` set, a leading `system` turn survives the trim and
    /// the tail is cut to `limit - 1` instead.
    pub fn trim_to(&mut self, limit: usize, pin_seed: bool) {
        if self.turns.len() <= limit {
            return;
        }

        let seed_pinned =
            pin_seed && limit > 0 && self.turns.first().map(|t| t.role) == Some(Role::System);

        if seed_pinned {
            let cut_from = self.turns.len() - (limit - 1);
            self.turns.drain(1..cut_from);
        } else {
            let cut = self.turns.len() - limit;
            self.turns.drain(..cut);
        }
    }

    /// The last `n` user/assistant turns, oldest first. The seed turn and
    /// any other `system` turns are never selected.
    #[must_use]
    pub fn recent_dialogue(&self, n: usize) -> Vec<&ConversationTurn> {
        let mut dialogue: Vec<&ConversationTurn> = self
            .turns
            .iter()
            .filter(|t| matches!(t.role, Role::User | Role::Assistant))
            .collect();
        let start = dialogue.len().saturating_sub(n);
        dialogue.split_off(start)
    }

    #[must_use]
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = "You are a helpful assistant.";

    fn history_with_dialogue(pairs: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        history.seed_if_empty(PROMPT);
        for i in 0..pairs {
            history.push(ConversationTurn::user(format!("question {i}")));
            history.push(ConversationTurn::assistant(format!("answer {i}")));
        }
        history
    }

    #[test]
    fn seed_is_installed_once() {
        let mut history = ConversationHistory::new();
        history.seed_if_empty(PROMPT);
        history.seed_if_empty(PROMPT);

        assert_eq!(history.len(), 1);
        assert_eq!(history.turns()[0], ConversationTurn::system(PROMPT));
    }

    #[test]
    fn reset_restores_single_seed() {
        let mut history = history_with_dialogue(4);
        assert_eq!(history.len(), 9);

        history.reset(PROMPT);

        assert_eq!(history.len(), 1);
        assert_eq!(history.turns()[0].role, Role::System);
    }

    #[test]
    fn trim_without_pin_evicts_seed() {
        let mut history = history_with_dialogue(6); // seed + 12 dialogue turns

        history.trim_to(10, false);

        assert_eq!(history.len(), 10);
        assert_eq!(history.turns()[0], ConversationTurn::user("question 1"));
        assert_eq!(history.turns()[9].content, "answer 5");
    }

    #[test]
    fn trim_with_pin_keeps_seed() {
        let mut history = history_with_dialogue(6);

        history.trim_to(10, true);

        assert_eq!(history.len(), 10);
        assert_eq!(history.turns()[0], ConversationTurn::system(PROMPT));
        assert_eq!(history.turns()[9].content, "answer 5");
    }

    #[test]
    fn trim_is_a_no_op_under_limit() {
        let mut history = history_with_dialogue(2);
        history.trim_to(10, false);
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn pin_falls_back_once_seed_is_gone() {
        let mut history = history_with_dialogue(6);
        history.trim_to(4, false); // seed already evicted

        history.push(ConversationTurn::user("more"));
        history.trim_to(4, true);

        assert_eq!(history.len(), 4);
        assert_ne!(history.turns()[0].role, Role::System);
    }

    #[test]
    fn recent_dialogue_skips_system_and_keeps_order() {
        let history = history_with_dialogue(3); // u0 a0 u1 a1 u2 a2

        let recent = history.recent_dialogue(5);

        let contents: Vec<&str> = recent.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["answer 0", "question 1", "answer 1", "question 2", "answer 2"]
        );
    }

    #[test]
    fn recent_dialogue_on_seed_only_history_is_empty() {
        let mut history = ConversationHistory::new();
        history.seed_if_empty(PROMPT);

        assert!(history.recent_dialogue(5).is_empty());
    }
}
