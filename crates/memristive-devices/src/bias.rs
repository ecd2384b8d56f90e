//! Bias direction of an applied voltage.

/// Which branch of a piecewise law a bias selects.
///
/// Zero bias belongs to the forward branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Forward,
    Reverse,
}

impl Bias {
    /// Classify a bias. Returns `None` for NaN, which selects no branch.
    #[inline]
    pub fn of(v: f64) -> Option<Self> {
        if v >= 0.0 {
            Some(Bias::Forward)
        } else if v < 0.0 {
            Some(Bias::Reverse)
        } else {
            None
        }
    }
}
