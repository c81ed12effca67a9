use halflife_core::Snapshot;

/// Event emitted by the Euler solver for each recorded snapshot.
///
/// Step 0 is the initial state before any integration.
#[derive(Debug)]
pub struct Event<'a, I, O> {
    /// Number of state updates applied before this snapshot.
    pub step: usize,

    /// Snapshot of the model input and output at this step.
    pub snapshot: &'a Snapshot<I, O>,

    /// Whether this snapshot is the run's final boundary record.
    pub terminal: bool,
}
