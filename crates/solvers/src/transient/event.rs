/// Event emitted by a transient solver.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N are emitted after each accepted integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<const N: usize> {
    /// The step number (0 for initial, 1..N for accepted steps).
    pub step: usize,

    /// Time at the end of the step.
    pub time: f64,

    /// Size of the step just taken (0 for the initial event).
    pub step_size: f64,

    /// State at the end of the step.
    pub state: [f64; N],
}
