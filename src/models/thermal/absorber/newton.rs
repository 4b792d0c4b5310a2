//! Scalar Newton iteration with an analytic slope.

/// Converged Newton iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Solution {
    pub(super) x: f64,
    pub(super) residual: f64,
    pub(super) iters: usize,
}

/// Reasons a Newton iteration stops without converging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Failure {
    /// The slope vanished, so no step can be taken.
    ZeroSlope { x: f64 },

    /// The residual, slope, or next iterate is not finite.
    NonFinite { x: f64 },

    /// The iteration cap was reached.
    MaxIters { x: f64, residual: f64, iters: usize },
}

/// Finds a root of `f` starting from `x0`.
///
/// `f` returns the residual and its derivative at `x`.
/// Converges once a step is smaller than `x_tol` in magnitude, returning the
/// iterate after that step.
pub(super) fn solve<F>(f: F, x0: f64, x_tol: f64, max_iters: usize) -> Result<Solution, Failure>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut x = x0;

    for iter in 1..=max_iters {
        let (residual, slope) = f(x);

        if !residual.is_finite() || !slope.is_finite() {
            return Err(Failure::NonFinite { x });
        }
        if slope == 0.0 {
            return Err(Failure::ZeroSlope { x });
        }

        let step = residual / slope;
        let next = x - step;
        if !next.is_finite() {
            return Err(Failure::NonFinite { x });
        }

        if step.abs() < x_tol {
            let (residual, _) = f(next);
            return Ok(Solution {
                x: next,
                residual,
                iters: iter,
            });
        }

        x = next;
    }

    let (residual, _) = f(x);
    Err(Failure::MaxIters {
        x,
        residual,
        iters: max_iters,
    })
}
