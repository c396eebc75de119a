pub mod labels;
pub mod registry;
pub mod triplet;

pub use labels::{NodeLabel, RelationshipLabel, LABEL_PAIRS};
pub use registry::SchemaRegistry;
pub use triplet::Triplet;
