pub mod container;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod parameters;
pub mod path;
pub mod registry;
pub mod resolver;
pub mod type_key;
pub mod validation;
