//! Mapping and sequence wrappers with a synchronized attribute-style view.
//!
//! [`AttrMap`] stores string-keyed entries and exposes each one twice: under
//! its original key and under a derived, identifier-shaped attribute name.
//! Both views are adapters over the same backing slot, so a write through
//! either is immediately visible through the other. Plain maps and sequences
//! are converted to [`AttrMap`]/[`AttrList`] as they are stored, recursively,
//! which keeps the attribute view working at any nesting depth.
//!
//! ```
//! use attrmap::AttrMap;
//!
//! let mut config = AttrMap::new();
//! config.set("dev-null", 0);
//! config.set("servers", vec![AttrMap::new().with("host", "a")]);
//!
//! assert_eq!(config["dev-null"], 0);
//! assert_eq!(*config.attr("dev_null").unwrap(), 0);
//!
//! let first = config.attr("servers").unwrap().as_list().unwrap()[0]
//!     .as_map()
//!     .unwrap();
//! assert_eq!(first["host"], "a");
//! ```
//!
//! Maps merge deeply: keys carrying maps on both sides accumulate, anything
//! else is overwritten by the later source.
//!
//! ```
//! use attrmap::AttrMap;
//!
//! let mut a = AttrMap::new().with("n", AttrMap::new().with("x", 1));
//! a.merge(AttrMap::new().with("n", AttrMap::new().with("y", 2)));
//!
//! let n = a["n"].as_map().unwrap();
//! assert_eq!(n["x"], 1);
//! assert_eq!(n["y"], 2);
//! ```

pub mod attr;
pub mod autosave;
pub mod error;
pub mod list;
pub mod map;
pub mod value;

mod json;

pub use attr::attr_name_for_key;
pub use autosave::AutosaveMap;
pub use error::{AccessError, StoreError};
pub use list::AttrList;
pub use map::AttrMap;
pub use value::{Kind, Value};
