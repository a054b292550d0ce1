#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("frequency table holds no observations")]
    EmptyTable,

    #[error("{family} sample is degenerate: {reason}")]
    DegenerateSample {
        family: &'static str,
        reason: String,
    },

    #[error("bucket {key} observed {observed} draws but its expected frequency is 0")]
    DegenerateBucket { key: i64, observed: u64 },

    #[error("no critical value tabulated for {dof} degrees of freedom (supported: 1..=20)")]
    UnsupportedDegreesOfFreedom { dof: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
