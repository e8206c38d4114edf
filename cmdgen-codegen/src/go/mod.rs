//! Go code generation modules.

pub mod accessors;
pub mod command;
pub mod constructors;

pub use accessors::AccessorGenerator;
pub use command::CommandGenerator;
pub use constructors::ConstructorGenerator;
