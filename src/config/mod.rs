//! Translation table construction options
/// Option types and validation
mod types;

pub use types::{
    DefaultTarget,
    TableOptions,
};
