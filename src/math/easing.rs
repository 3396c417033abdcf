use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which end of the curve is eased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EaseKind {
    In,
    Out,
    InOut,
}

/// Easing curve, named the way timeline libraries name them (`power3.inOut`).
///
/// `Power(n, _)` uses exponent `n + 1`, so `power1` is quadratic and
/// `power3` quartic. Every curve maps 0 to 0 and 1 to 1 exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    Power(u8, EaseKind),
    Sine(EaseKind),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown easing `{0}`")]
pub struct UnknownEasing(pub String);

impl Easing {
    pub const DEFAULT_FLIGHT: Easing = Easing::Power(3, EaseKind::InOut);

    /// Apply the curve to `t`, clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power(n, kind) => {
                let p = i32::from(n) + 1;
                match kind {
                    EaseKind::In => t.powi(p),
                    EaseKind::Out => 1.0 - (1.0 - t).powi(p),
                    EaseKind::InOut => {
                        if t < 0.5 {
                            2f32.powi(p - 1) * t.powi(p)
                        } else {
                            1.0 - (-2.0 * t + 2.0).powi(p) * 0.5
                        }
                    }
                }
            }
            Easing::Sine(kind) => {
                use std::f32::consts::{FRAC_PI_2, PI};
                if t >= 1.0 {
                    return 1.0;
                }
                match kind {
                    EaseKind::In => 1.0 - (t * FRAC_PI_2).cos(),
                    EaseKind::Out => (t * FRAC_PI_2).sin(),
                    EaseKind::InOut => -((PI * t).cos() - 1.0) * 0.5,
                }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::DEFAULT_FLIGHT
    }
}

fn parse_kind(s: &str) -> Option<EaseKind> {
    match s {
        "in" => Some(EaseKind::In),
        "out" => Some(EaseKind::Out),
        "inOut" => Some(EaseKind::InOut),
        _ => None,
    }
}

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownEasing(s.to_string());

        if s == "linear" || s == "none" {
            return Ok(Easing::Linear);
        }

        // Bare family names default to `.out`
        let (family, kind) = match s.split_once('.') {
            Some((family, kind)) => (family, parse_kind(kind).ok_or_else(unknown)?),
            None => (s, EaseKind::Out),
        };

        match family {
            "sine" => Ok(Easing::Sine(kind)),
            "power0" => Ok(Easing::Linear),
            "quad" => Ok(Easing::Power(1, kind)),
            "cubic" => Ok(Easing::Power(2, kind)),
            "quart" => Ok(Easing::Power(3, kind)),
            "quint" => Ok(Easing::Power(4, kind)),
            _ => {
                let n: u8 = family
                    .strip_prefix("power")
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(unknown)?;
                if (1..=4).contains(&n) {
                    Ok(Easing::Power(n, kind))
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = UnknownEasing;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = |k: &EaseKind| match k {
            EaseKind::In => "in",
            EaseKind::Out => "out",
            EaseKind::InOut => "inOut",
        };
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::Power(n, k) => write!(f, "power{}.{}", n, kind(k)),
            Easing::Sine(k) => write!(f, "sine.{}", kind(k)),
        }
    }
}

impl From<Easing> for String {
    fn from(value: Easing) -> Self {
        value.to_string()
    }
}
