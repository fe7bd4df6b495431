//! Resource Tree Engine
//!
//! The inventory travels over the wire as flat records with parent
//! references; the nested shape only ever exists locally. This module owns
//! that shape:
//!
//! - [`builder`] - rebuilds the forest from the flat record list
//! - [`mutator`] - non-destructive create/update/delete over a forest
//!
//! Mutations never touch the input forest: each operation returns a new
//! forest value so the previous one stays valid for whoever still holds it.

pub mod builder;
pub mod mutator;

pub use builder::build_forest;
pub use mutator::{create_child, delete_node, find_node, update_node, NodePatch};
