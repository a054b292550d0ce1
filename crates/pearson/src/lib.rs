#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

pub mod prelude {
    //! Import of the table, evaluator, and report types

    pub use crate::{
        Error, Result,
        critical::{ALPHA, MAX_DOF, critical_value},
        fit::{
            BucketFit, ContinuousUniformFit, DiscreteUniformFit, Estimate, EventCountFit,
            FamilyFit, FitReport, PoissonFit, evaluate,
        },
        table::FrequencyTable,
    };
}

mod error;
pub use error::{Error, Result};

pub mod critical;
pub mod fit;
pub mod table;
#[cfg(feature = "parallel")]
pub mod par_table;
