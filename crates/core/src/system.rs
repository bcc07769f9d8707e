/// A first-order system of ordinary differential equations `dy/dt = f(t, y)`.
///
/// Implementors map a time and an `N`-component state to the state's time
/// derivative. Evaluation is fallible so that external inputs consulted by the
/// system (forcing functions, lookups) can report their own errors, which
/// integrators hand back to the caller unchanged.
///
/// Integrators may call [`derivative`](OdeSystem::derivative) at any time
/// inside the integration span, including trial points of rejected steps, so
/// implementations should be free of side effects.
pub trait OdeSystem<const N: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the state derivative at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated.
    fn derivative(&self, t: f64, state: &[f64; N]) -> Result<[f64; N], Self::Error>;
}

impl<S, const N: usize> OdeSystem<N> for &S
where
    S: OdeSystem<N> + ?Sized,
{
    type Error = S::Error;

    fn derivative(&self, t: f64, state: &[f64; N]) -> Result<[f64; N], Self::Error> {
        (**self).derivative(t, state)
    }
}
