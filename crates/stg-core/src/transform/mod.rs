pub mod assemble;
pub mod definition_builder;
pub mod name_normalizer;
pub mod operation_builder;
pub mod parameter_classifier;
pub mod security_resolver;
pub mod type_converter;

pub use assemble::{assemble, assemble_with_options};
