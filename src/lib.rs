//! Turn payment-processor activity exports into a filtered, chronologically
//! ordered running balance.
//!
//! ```rust,ignore
//! use payment_history_rs::{Session, UploadBatch};
//!
//! let mut session = Session::new();
//! session.load(UploadBatch::new().file("activity.csv"))?;
//! session.toggle_merchant("Coffee Shop");
//!
//! let view = session.view()?;
//! println!("net: {}", view.summary.net_amount);
//! ```

mod aggregate;
mod builder;
mod filters;
mod session;
mod types;
mod view;

pub mod errors;
pub mod parsers;

pub use aggregate::{CategoryPoint, CumulativeTransaction, Summary, TimePoint, View, aggregate};
pub use builder::{ParserBuilder, UploadBatch};
pub use filters::{
    COMPLETED_STATUS, DateRange, EXCLUDED_TYPE_PHRASES, Filters, InclusionRules,
    MerchantSelection, merchant_universe,
};
pub use parsers::prelude::*;
pub use session::Session;
pub use types::Transaction;
pub use view::{compute_view, resolve};
