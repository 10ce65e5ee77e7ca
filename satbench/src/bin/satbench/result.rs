use satbench::testset::TestsetError;
use thiserror::Error;

pub(crate) type SatBenchResult<T> = Result<T, SatBenchError>;

#[derive(Error, Debug)]
pub(crate) enum SatBenchError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to write the results table, more details: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to generate formulas, more details: {0}")]
    Testset(#[from] TestsetError),
    #[error("No instances found in {0}.")]
    NoInstances(String),
}
