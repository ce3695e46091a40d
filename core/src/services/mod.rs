//! Resource services.
//!
//! Each service borrows the client's `Dispatcher` and expresses every
//! operation as a single `Dispatcher::fetch` with a method, path, and
//! optional payload. No service adds HTTP behaviour of its own.

pub mod dedicated_account;
pub mod dispute;
pub mod product;
pub mod refund;
pub mod split;

pub use dedicated_account::DedicatedAccountService;
pub use dispute::DisputeService;
pub use product::ProductService;
pub use refund::RefundService;
pub use split::SplitService;
