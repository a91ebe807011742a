//! Specifies the contracts between the engine and a representation layer: candidate programs, genetic
//! operators and the configuration model which binds them together.

mod model;
pub use self::model::*;

mod operators;
pub use self::operators::*;

mod parameters;
pub use self::parameters::*;

mod program;
pub use self::program::*;
