//! Scalar coefficient trait.

use std::fmt::{Debug, Display};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use num_traits::Float;

use crate::index::Exponent;

/// A real scalar usable as a polynomial coefficient and as a coordinate.
///
/// Evaluation relies on [`Float::powi`] for integer exponentiation of
/// coordinates.
pub trait Coefficient:
    Float + AddAssign + SubAssign + MulAssign + DivAssign + Debug + Display + Send + Sync + 'static
{
    /// Converts an exponent into a scalar factor.
    fn from_exponent(e: Exponent) -> Self;
}

impl Coefficient for f64 {
    fn from_exponent(e: Exponent) -> Self {
        f64::from(e)
    }
}

impl Coefficient for f32 {
    #[allow(clippy::cast_precision_loss)]
    fn from_exponent(e: Exponent) -> Self {
        e as f32
    }
}
