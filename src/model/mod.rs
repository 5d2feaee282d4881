pub mod id;
pub mod node;
pub mod workflow;

pub use id::*;
pub use node::*;
pub use workflow::*;
