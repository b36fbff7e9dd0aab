//! Filter records for faceted catalog search.
//!
//! A [`Filter`] is one selectable option inside a facet: a brand, a colour, a
//! price range. It carries a label, an opaque type used by query logic,
//! activation and display flags, free-form properties, a magnitude (usually
//! the number of matching products), a value, and the encoded facet states
//! used to build follow-on links.
//!
//! Filters render to a fixed-key [`FilterSnapshot`] and can be rebuilt from one,
//! which is how serialized fixtures become live objects again. The
//! [`fixtures`] module reads such fixtures from JSON or TOML files, and
//! [`settings`] resolves where those files live.
//!
//! # Example
//!
//! ```
//! use facet_filter::Filter;
//!
//! let mut filter = Filter::new();
//! filter
//!     .set_label("Blue")
//!     .set_type("attribute_group")
//!     .activate()
//!     .set_magnitude("3")
//!     .set_property("color", "#0000ff");
//!
//! let rebuilt = Filter::from_snapshot(filter.to_snapshot());
//! assert_eq!(rebuilt.magnitude(), 3);
//! assert_eq!(rebuilt, filter);
//! ```

pub mod error;
pub mod filter;
pub mod fixtures;
pub mod settings;

pub use error::FilterError;
pub use filter::{Filter, FilterSnapshot, IntoMagnitude};
pub use fixtures::{FixtureFormat, FixtureStore, parse_fixture};
pub use settings::FixtureSettings;
