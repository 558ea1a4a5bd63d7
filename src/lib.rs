// Crate root library declaration and module exports.
pub mod alias;
pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod fields;
pub mod model;
pub mod prefs;
pub mod storage;
pub mod template;
pub mod value;

pub use value::Record;
