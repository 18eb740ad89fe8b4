//! Chain store repository methods, implemented on [`crate::AuditDb`].

mod audit;

pub use audit::AuditFilter;
