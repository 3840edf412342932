pub mod materializer;

pub use materializer::TransactionMaterializer;
