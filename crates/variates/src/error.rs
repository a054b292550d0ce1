#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid parameters for the {family} generator: {reason}")]
    InvalidParameters {
        family: &'static str,
        reason: String,
    },

    #[error("intensity {intensity} exceeds the dominating rate {rate} at t = {t}")]
    IntensityExceedsRate { t: f64, intensity: f64, rate: f64 },

    #[error("{family} sampling did not terminate within {cap} steps")]
    SamplingStall { family: &'static str, cap: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
