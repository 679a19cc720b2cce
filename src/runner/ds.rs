pub mod array_object;
pub mod error;
pub mod execution_context;
pub mod object;
pub mod operations;
pub mod scope;
pub mod value;
