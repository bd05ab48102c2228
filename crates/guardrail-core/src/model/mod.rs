pub mod construct;
pub mod value;

pub use construct::{ConstructNode, NodeKind, ResourceView};
pub use value::PropertyValue;
