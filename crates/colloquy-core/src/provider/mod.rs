mod chat_complete;
mod options;

pub use chat_complete::*;
pub use options::*;
