//! Trajectory interpolation between camera poses.
//!
//! Pose interpolation lerps the endpoint rotation vectors and converts each
//! sample back to a matrix, so the path is a straight line in
//! rotation-vector space rather than the geodesic on the rotation manifold.
//! Positional paths through control points use Bernstein-basis Bezier
//! evaluation.

use crate::error::{EngineError, EngineResult};
use crate::rotation::{interpolate_rotation_vectors, Orientation};

/// One sample of an interpolation run, in temporal order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    /// Interpolation parameter in [0, 1].
    pub t: f64,

    /// Interpolated camera orientation at `t`.
    pub orientation: Orientation,

    /// Interpolated 3D position when a control-point path is used.
    pub position: Option<[f64; 3]>,
}

/// Evenly spaced parameters over [0, 1], endpoint-inclusive for 2+ steps.
///
/// One step samples the midpoint; zero steps is an empty run, not an error.
fn sample_parameters(steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.5],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Interpolate `steps` orientations between two poses.
///
/// The first and last samples coincide with `a` and `b` when `steps >= 2`.
pub fn interpolate_poses(a: &Orientation, b: &Orientation, steps: usize) -> Vec<Orientation> {
    let rvec_a = a.rotation_vector();
    let rvec_b = b.rotation_vector();

    sample_parameters(steps)
        .into_iter()
        .map(|t| {
            let rvec = interpolate_rotation_vectors(&rvec_a, &rvec_b, t);
            Orientation::from_rotation_vector(rvec)
        })
        .collect()
}

/// Interpolate poses and tag each with its parameter, without positions.
pub fn sample_trajectory(a: &Orientation, b: &Orientation, steps: usize) -> Vec<TrajectorySample> {
    let rvec_a = a.rotation_vector();
    let rvec_b = b.rotation_vector();

    sample_parameters(steps)
        .into_iter()
        .map(|t| TrajectorySample {
            t,
            orientation: Orientation::from_rotation_vector(interpolate_rotation_vectors(
                &rvec_a, &rvec_b, t,
            )),
            position: None,
        })
        .collect()
}

/// Interpolate poses paired with positions along a Bezier control path.
///
/// # Errors
/// `InvalidInput` if the control path is invalid (see [`interpolate_path`]).
pub fn sample_trajectory_with_path(
    a: &Orientation,
    b: &Orientation,
    control_points: &[[f64; 3]],
    steps: usize,
) -> EngineResult<Vec<TrajectorySample>> {
    let positions = interpolate_path(control_points, steps)?;
    let mut samples = sample_trajectory(a, b, steps);

    for (sample, position) in samples.iter_mut().zip(positions) {
        sample.position = Some(position);
    }

    Ok(samples)
}

/// Evaluate a Bezier trajectory through `control_points` at `steps` samples.
///
/// position(t) = sum_i C(n,i) * t^i * (1-t)^(n-i) * control_points[i].
/// Binomial coefficients are accumulated in f64, which is stable for paths
/// of up to a few dozen control points; larger paths are out of scope.
///
/// # Errors
/// `InvalidInput` if fewer than 2 control points are given or any
/// coordinate is non-finite.
pub fn interpolate_path(
    control_points: &[[f64; 3]],
    steps: usize,
) -> EngineResult<Vec<[f64; 3]>> {
    if control_points.len() < 2 {
        return Err(EngineError::invalid_input(format!(
            "Bezier path needs at least 2 control points, got {}",
            control_points.len()
        )));
    }

    if control_points
        .iter()
        .any(|p| p.iter().any(|c| !c.is_finite()))
    {
        return Err(EngineError::invalid_input(
            "Bezier control points must be finite",
        ));
    }

    Ok(sample_parameters(steps)
        .into_iter()
        .map(|t| bezier_point(control_points, t))
        .collect())
}

/// Evaluate the Bernstein-weighted sum of control points at `t`.
fn bezier_point(control_points: &[[f64; 3]], t: f64) -> [f64; 3] {
    let n = control_points.len() - 1;
    let mut point = [0.0; 3];

    for (i, cp) in control_points.iter().enumerate() {
        let weight = binomial(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32);
        for axis in 0..3 {
            point[axis] += weight * cp[axis];
        }
    }

    point
}

/// Binomial coefficient C(n, k) accumulated in f64.
fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}
