//! Transport-independent request handling shared by the HTTP and
//! invocation adapters.

pub mod dispatcher;
pub mod envelope;

pub use dispatcher::{
    DISPATCH_TIMEOUT, DispatchError, Dispatched, Route, RoutingError, dispatch,
    dispatch_with_timeout, route,
};
pub use envelope::{Reply, dispatch_envelope};
