//! Player actions decoded from frame button ordinals.
//!
//! Ordinals are 1-based, matching the `fc:frame:button:N` tags that produced
//! them. Ordinals without a meaning on a screen decode to `Unrecognized` and
//! are answered with a no-op re-render.

/// Direction to move through the opponent roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Actions available on the explore screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreAction {
    Navigate(Direction),
    Engage,
    Unrecognized(u8),
}

impl ExploreAction {
    pub fn from_button(index: u8) -> Self {
        match index {
            1 => Self::Navigate(Direction::Previous),
            2 => Self::Engage,
            3 => Self::Navigate(Direction::Next),
            other => Self::Unrecognized(other),
        }
    }
}

/// Actions available on the battle-entry screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// Placeholder button; escaping is not implemented.
    Flee,
    Fight,
    Unrecognized(u8),
}

impl BattleAction {
    pub fn from_button(index: u8) -> Self {
        match index {
            1 => Self::Flee,
            2 => Self::Fight,
            other => Self::Unrecognized(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_ordinals() {
        assert_eq!(
            ExploreAction::from_button(1),
            ExploreAction::Navigate(Direction::Previous)
        );
        assert_eq!(ExploreAction::from_button(2), ExploreAction::Engage);
        assert_eq!(
            ExploreAction::from_button(3),
            ExploreAction::Navigate(Direction::Next)
        );
        assert_eq!(ExploreAction::from_button(4), ExploreAction::Unrecognized(4));
    }

    #[test]
    fn battle_ordinals() {
        assert_eq!(BattleAction::from_button(1), BattleAction::Flee);
        assert_eq!(BattleAction::from_button(2), BattleAction::Fight);
        assert_eq!(BattleAction::from_button(3), BattleAction::Unrecognized(3));
    }
}
