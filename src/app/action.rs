/// Side effects requested by the handler, carried out by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Overwrite the stored election with the current state.
    Persist,
    Quit,
}
