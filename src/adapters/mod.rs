// Adapters layer: concrete stores behind the domain ports.

pub mod csv_store;
pub mod memory;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
