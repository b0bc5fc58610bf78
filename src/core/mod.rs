pub mod coordinator;
pub mod dedup;
pub mod etl;
pub mod pairing;
pub mod pipeline;
pub mod splitter;

pub use crate::domain::model::{Pair, PairingResult, Record, SanitizedDataset, Scalar};
pub use crate::domain::ports::{ConfigProvider, ErrorPolicy, Pipeline, Storage};
pub use crate::utils::error::Result;
