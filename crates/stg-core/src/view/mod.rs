pub mod builder;
pub mod methods;
pub mod types;

pub use builder::ViewModelBuilder;
pub use methods::*;
pub use types::*;
