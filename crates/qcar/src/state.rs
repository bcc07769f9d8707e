use crate::error::DimensionError;

/// Quarter-car state `[q1, q2, u1, u2]`.
///
/// `q1` and `q2` are the vertical displacements of the sprung and unsprung
/// masses, and `u1` and `u2` are their velocities.
pub type State = [f64; 4];

/// Checks that a dynamically sized state has exactly four components.
///
/// # Errors
///
/// Returns [`DimensionError::State`] if `values` does not have length 4.
pub fn state_from_slice(values: &[f64]) -> Result<State, DimensionError> {
    values.try_into().map_err(|_| DimensionError::State {
        actual: values.len(),
    })
}

/// Returns the generalized coordinates `[q1, q2]`.
#[inline]
#[must_use]
pub fn positions(state: &State) -> [f64; 2] {
    [state[0], state[1]]
}

/// Returns the generalized speeds `[u1, u2]`.
#[inline]
#[must_use]
pub fn velocities(state: &State) -> [f64; 2] {
    [state[2], state[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_positions_and_velocities() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(positions(&x), [1.0, 2.0]);
        assert_eq!(velocities(&x), [3.0, 4.0]);
    }

    #[test]
    fn slice_length_is_checked() {
        assert_eq!(state_from_slice(&[0.0; 4]), Ok([0.0; 4]));
        assert_eq!(
            state_from_slice(&[0.0; 3]),
            Err(DimensionError::State { actual: 3 })
        );
        assert_eq!(
            state_from_slice(&[0.0; 7]),
            Err(DimensionError::State { actual: 7 })
        );
    }
}
