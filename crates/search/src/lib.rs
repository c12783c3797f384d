//! # Order Search
//!
//! Menu knowledge search for the `search` tool.
//!
//! ## Flow
//!
//! ```text
//! query text
//!     │
//!     ├──> SearchBackend (hybrid: text + optional vector, semantic ranking, projection)
//!     │      └─> FieldMismatch? retry once with [identifier, content]
//!     │
//!     └──> "[id]: Name: .., Category: .., Description: .., Sizes: .." lines
//!            joined by "-----", or a notice when nothing comes back
//! ```
//!
//! The production index client lives outside this crate and plugs in through
//! [`SearchBackend`]. [`CatalogSearchBackend`] serves the same contract from the menu
//! document for offline use.

mod backend;
mod catalog_backend;
mod error;
mod menu_search;

pub use backend::{RecordStream, SearchBackend, SearchQuery, SearchRecord, VectorQuery};
pub use catalog_backend::CatalogSearchBackend;
pub use error::{Result, SearchError};
pub use menu_search::{MenuSearch, SearchConfig, NO_MATCHES_NOTICE, UNAVAILABLE_NOTICE};
