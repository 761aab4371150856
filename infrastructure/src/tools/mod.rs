//! Tool adapters
//!
//! Tools are external services reached over HTTP. This module provides the
//! [`ToolInvoker`](borg_application::ToolInvoker) that talks to them.

mod http_invoker;

pub use http_invoker::HttpToolInvoker;
