use serde::{Deserialize, Serialize};

/// Easing curve applied to view transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
}

impl EasingType {
    /// Apply easing function to a normalized time value (0.0 to 1.0)
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            // Smooth step (3t^2 - 2t^3)
            EasingType::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::EaseInOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            EasingType::Linear,
            EasingType::EaseIn,
            EasingType::EaseOut,
            EasingType::EaseInOut,
            EasingType::Smooth,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-12, "{:?} should start at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?} should end at 1", easing);
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(EasingType::Linear.apply(-1.0), 0.0);
        assert_eq!(EasingType::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let a = EasingType::EaseInOut.apply(0.25);
        let b = EasingType::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }
}
