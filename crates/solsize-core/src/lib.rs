pub mod bytecode;
pub mod classify;
pub mod error;
pub mod filter;
pub mod limits;
pub mod settings;
pub mod size;

pub use bytecode::measure;
pub use classify::{count_oversized, proximity, validate_no_oversized, Proximity};
pub use error::{Error, Result};
pub use filter::ContractFilter;
pub use limits::{SizeUnit, DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT};
pub use settings::SolcSettings;
pub use size::{
    ensure_unique_display_names, extract_sizes, merge_sizes, CompiledContract, ContractSize,
    MergedContractSize, SizeRecord,
};
