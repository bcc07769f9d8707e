use super::tableau::{D1, D3, D4, D5, D6, D7};

/// Fourth-order interpolant across one accepted step.
pub(super) struct Dense<const N: usize> {
    t_old: f64,
    h: f64,
    r: [[f64; N]; 5],
}

impl<const N: usize> Dense<N> {
    /// Builds the interpolant from the step endpoints and its stages.
    ///
    /// `k` holds the seven stage derivatives, where `k[1]` is unused.
    pub(super) fn new(
        t_old: f64,
        h: f64,
        y_old: &[f64; N],
        y_new: &[f64; N],
        k: [&[f64; N]; 7],
    ) -> Self {
        let mut r = [[0.0; N]; 5];
        for i in 0..N {
            let diff = y_new[i] - y_old[i];
            let bspl = h * k[0][i] - diff;
            r[0][i] = y_old[i];
            r[1][i] = diff;
            r[2][i] = bspl;
            r[3][i] = diff - h * k[6][i] - bspl;
            r[4][i] = h
                * (D1 * k[0][i]
                    + D3 * k[2][i]
                    + D4 * k[3][i]
                    + D5 * k[4][i]
                    + D6 * k[5][i]
                    + D7 * k[6][i]);
        }
        Self { t_old, h, r }
    }

    /// Evaluates the interpolant at `t`.
    pub(super) fn at(&self, t: f64) -> [f64; N] {
        let theta = (t - self.t_old) / self.h;
        let theta1 = 1.0 - theta;
        let r = &self.r;
        std::array::from_fn(|i| {
            r[0][i] + theta * (r[1][i] + theta1 * (r[2][i] + theta * (r[3][i] + theta1 * r[4][i])))
        })
    }
}
