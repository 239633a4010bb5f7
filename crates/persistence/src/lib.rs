pub mod error;
pub mod codec;
pub mod header;
pub mod frame;
pub mod writer;
pub mod reader;
pub mod fixtures;

pub use error::{PersistenceError, Result};
pub use header::{StoreFooter, StoreHeader};
pub use reader::StoreReader;
pub use writer::{StoreSummary, StoreWriter};
