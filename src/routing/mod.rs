//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     (method, template, handler)
//!     → matcher.rs (normalize + compile template)
//!     → router.rs (append to method's list, or replace same template)
//!     → dispatch.rs (freeze table behind Arc)
//!
//! Incoming Request (method, raw target):
//!     → normalize.rs (split path/query, strip trailing '/')
//!     → params (decode query)
//!     → router.rs (first matching route, decoded captures)
//!     → dispatch.rs (merge params, invoke handler)
//!     → Outcome { status, body }
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable once the dispatcher exists
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod matcher;
pub mod normalize;
pub mod router;

pub use dispatch::{Dispatcher, Outcome, NOT_FOUND_BODY};
pub use error::{DispatchError, RouteError};
pub use handler::{Handler, HandlerError, Signature};
pub use matcher::PathPattern;
pub use normalize::{normalize, Target};
pub use router::{RouteEntry, RouteMatch, RouteTable};
