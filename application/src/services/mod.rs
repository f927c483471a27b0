//! Application services shared by the use cases

pub mod fault_policy;
pub mod tool_invoker;

pub use fault_policy::{CertificateFault, with_cert_fallback};
pub use tool_invoker::ToolInvoker;
