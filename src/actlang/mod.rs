
pub mod compiler;
pub mod encoder;
pub mod error;
pub mod instruction;
pub mod record;
pub mod token;
pub mod writer;
