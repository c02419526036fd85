//! Built-in site models.

pub mod amazon;

use crate::site::Site;

/// Every built-in model, in registration order.
#[must_use]
pub fn builtin() -> Vec<Site> {
    vec![amazon::book_model()]
}
