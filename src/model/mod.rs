// File: ./src/model/mod.rs
pub mod entry;
pub mod item;

pub use entry::QuickEntry;
pub use item::Task;
