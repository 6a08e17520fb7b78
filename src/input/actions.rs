//! Game action definitions

/// Everything the player can ask the game to do
///
/// Keyboard / gamepad mappings:
/// - Left, A / D-pad left, left stick = MoveLeft
/// - Right, D / D-pad right, left stick = MoveRight
/// - Space, W, Up / South (A on Xbox, Cross on PlayStation) = Jump
/// - Escape / Select = Quit
/// - F1 = ToggleDebug
/// - R / Start = Reset
/// - F5 = ExportLevel (native only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveLeft,
    MoveRight,

    // Edge-triggered
    Jump,

    // System
    Quit,
    ToggleDebug,
    Reset,
    ExportLevel,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::Quit,
        Action::ToggleDebug,
        Action::Reset,
        Action::ExportLevel,
    ];
}
