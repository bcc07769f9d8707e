/// A hook called by integrators as they advance through time.
///
/// Each call hands over a solver event, typically the state after an
/// accepted step. Returning `Some(action)` asks the integrator to act on it
/// (for example, to stop at the current time). Returning `None` leaves the
/// run unaffected.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
