//! Whole-tree transforms.
//!
//! The ones that change keys or values first walk the tree without
//! touching it and record what to do, then apply the recorded edits.

mod change;
mod mongo;
mod paths;
mod property;
mod rename;

pub use change::{change_value, convert_date_to_iso_string};
pub use mongo::{fix_error_for_mongo, fix_for_mongo, mongo_safe_key};
pub use paths::{path_array, path_dict, walk, PathEntry};
pub use property::set_property;
pub use rename::{rename_key, PathKey};
