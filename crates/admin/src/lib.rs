//! Admin client for the atelier messages API.
//!
//! [`manager::MessageManager`] is the controller behind the admin inbox:
//! it tracks the current view, row selection, and loading state, and issues
//! list/bulk-mutation calls through the [`gateway::MessagesGateway`] seam.
//! The [`http::HttpGateway`] implementation talks to the real API; tests
//! drive the manager with a mock.

pub mod gateway;
pub mod http;
pub mod manager;
