pub mod environment;
pub mod error;
pub mod interpreter;

pub use environment::{InitPolicy, VarId, Variable, VariableStore};
pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::Interpreter;
