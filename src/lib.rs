//! # mvpoly
//!
//! Sparse multivariate polynomials with generalized Horner evaluation.
//!
//! ## Quick Start
//!
//! ```rust
//! use mvpoly::prelude::*;
//!
//! // 3x^2y + 2xy^2 + 5
//! let p = Polynomial::from_terms(
//!     2,
//!     [
//!         (ExponentIndex::from([2, 1]), 3.0),
//!         (ExponentIndex::from([1, 2]), 2.0),
//!         (ExponentIndex::from([0, 0]), 5.0),
//!     ],
//! )?;
//! assert_eq!(p.evaluate(&[1.0, 2.0])?, 19.0);
//!
//! let dx = p.differentiate(0)?;
//! assert_eq!(dx.to_string(), "6*x*y + 2*y^2");
//!
//! let mut eval = RepeatedEvaluator::new(p);
//! assert_eq!(eval.evaluate(&[2.0, -1.0])?, -3.0);
//! # Ok::<(), mvpoly::core::PolyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use mvpoly_core as core;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mvpoly_core::{
        ExponentIndex, MonomialOrder, PolyError, Polynomial, RepeatedEvaluator,
    };
}
