//! Matrix entity: the runtime-typed dense matrix and its storage order

mod core;
mod fmt;
mod order;

pub use self::core::Matrix;
pub use order::StorageOrder;
