//! Admin chat handlers
//!
//! Ban reports are posted here, admins forward missed spam here and press
//! the report buttons here.

pub mod callbacks;
pub mod forwarded;
pub mod report;

pub use callbacks::{delete_and_ban, handle_admin_callback};
pub use forwarded::{correlate, handle_forwarded_report};
pub use report::report_ban;
