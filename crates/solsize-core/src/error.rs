use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid bytecode hex: {0}")]
    Decode(#[from] hex::FromHexError),

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Ambiguous contract name: {0}")]
    AmbiguousContractName(String),

    #[error(
        "{count} contract(s) exceed the size limit for mainnet deployment \
         ({over_deployed} over the deployed limit, {over_init} over the initcode limit)"
    )]
    Oversized {
        count: usize,
        over_deployed: usize,
        over_init: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
