// Copyright 2026 the Cardstack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spring step response for the snap-back.

/// A unit spring step response.
///
/// Parameterized the way interaction designers tune springs: a damping
/// ratio and a response period. The curve starts at 0, settles at 1, and
/// overshoots when the damping ratio is below 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    /// Fraction of critical damping. Below 1 overshoots; 1 or above does
    /// not. Ratios above 1 are evaluated as critically damped.
    pub damping_ratio: f64,
    /// Period, in seconds, the spring would oscillate at with no damping.
    pub response: f64,
}

impl Default for SpringCurve {
    fn default() -> Self {
        Self::SNAP_BACK
    }
}

impl SpringCurve {
    /// The snap-back spring: a light overshoot settling in about half a
    /// second.
    pub const SNAP_BACK: Self = Self {
        damping_ratio: 0.7,
        response: 0.5,
    };

    /// Curve value `t` seconds after release. Starts at 0, settles at 1.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let zeta = self.damping_ratio;
        let omega = core::f64::consts::TAU / self.response;

        if zeta < 1.0 {
            let omega_d = omega * libm::sqrt(1.0 - zeta * zeta);
            let envelope = libm::exp(-zeta * omega * t);
            1.0 - envelope
                * (libm::cos(omega_d * t) + zeta * omega / omega_d * libm::sin(omega_d * t))
        } else {
            let envelope = libm::exp(-omega * t);
            1.0 - envelope * (1.0 + omega * t)
        }
    }

    /// Seconds until the response envelope stays within `tolerance` of
    /// rest, estimated from the exponential envelope alone.
    ///
    /// Hosts use this to schedule the settle report after a snap back.
    #[must_use]
    pub fn settling_seconds(&self, tolerance: f64) -> f64 {
        let zeta = if self.damping_ratio < 1.0 {
            self.damping_ratio
        } else {
            1.0
        };
        let omega = core::f64::consts::TAU / self.response;
        -libm::log(tolerance) / (zeta * omega)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest_and_settles_at_one() {
        let spring = SpringCurve::SNAP_BACK;
        assert!(spring.value(-0.1).abs() < 1e-12);
        assert!(spring.value(0.0).abs() < 1e-12);
        assert!((spring.value(10.0 * spring.response) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn underdamped_overshoots() {
        let spring = SpringCurve::SNAP_BACK;
        let mut peak: f64 = 0.0;
        for step in 0..200 {
            let t = f64::from(step) * 0.01;
            peak = peak.max(spring.value(t));
        }
        assert!(peak > 1.01, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn critically_damped_never_overshoots() {
        let spring = SpringCurve {
            damping_ratio: 1.0,
            response: 0.5,
        };
        let mut previous = 0.0;
        for step in 0..200 {
            let t = f64::from(step) * 0.01;
            let value = spring.value(t);
            assert!(value <= 1.0 + 1e-12);
            assert!(value + 1e-12 >= previous, "must be monotone");
            previous = value;
        }
    }

    #[test]
    fn settling_estimate_brackets_the_tail() {
        let spring = SpringCurve::SNAP_BACK;
        let tolerance = 1e-3;
        let settled = spring.settling_seconds(tolerance);
        // The envelope bound is loose by at most 1/sqrt(1 - zeta^2).
        assert!((spring.value(settled) - 1.0).abs() < 2.0 * tolerance);

        let quicker = SpringCurve {
            damping_ratio: 0.7,
            response: 0.25,
        };
        assert!(
            (quicker.settling_seconds(tolerance) - settled / 2.0).abs() < 1e-9,
            "settling scales with response"
        );
    }
}
