#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

mod error;
pub use error::{Error, Result};

pub mod poisson;
pub mod process;
pub mod uniform;

pub mod prelude {
    //! Import of the generator types and the crate error alias

    pub use crate::{
        Error, Result,
        poisson::Poisson,
        process::{PathSample, PoissonProcess, ThinnedPoissonProcess},
        uniform::{ContinuousUniform, DiscreteUniform},
    };
}
