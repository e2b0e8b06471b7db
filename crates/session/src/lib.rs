//! `aula-session` — background monitors for session validity and backend
//! reachability.
//!
//! Both monitors are independent fixed-interval tasks publishing state over
//! `watch` channels. They coordinate with nothing and share no state; the
//! shell subscribes and decides what to show.

pub mod connectivity;
pub mod monitor;

pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, ConnectivityState, HttpProbe};
pub use monitor::{SessionMonitor, SessionState};
