//! Rule and interaction options for a game.

/// Options that change how a game reacts to input or decides its end.
/// The default values give standard behavior.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Options {
    /// Clicking a square that is neither a candidate nor a selectable piece,
    /// or clicking the selected piece again, drops the current selection.
    /// A forced multi-jump selection is never dropped.
    pub deselect_on_miss: bool,
    /// A player to move who still has pieces but no legal move loses.
    /// If false, a game only ends when one side has no pieces left.
    pub blocked_player_loses: bool,
}

impl Options {
    pub const fn new() -> Self {
        Self {
            deselect_on_miss: false,
            blocked_player_loses: true,
        }
    }

    pub fn with_deselect_on_miss(mut self, value: bool) -> Self {
        self.deselect_on_miss = value;
        self
    }

    pub fn with_blocked_player_loses(mut self, value: bool) -> Self {
        self.blocked_player_loses = value;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
