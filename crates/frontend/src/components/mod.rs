//! Reusable UI components.

mod error_banner;
mod loading;
mod search_box;
mod stat_card;
mod status_badge;

pub use error_banner::ErrorBanner;
pub use loading::Loading;
pub use search_box::SearchBox;
pub use stat_card::StatCard;
pub use status_badge::{PaymentBadge, StatusBadge};
