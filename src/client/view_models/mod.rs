//! # View Models
//!
//! Screen-facing state machines. Everything here is driven by the
//! binary (or a future UI shell) and talks to the backend only through
//! the cache, the mutation executor, and the service adapters.

pub mod account_forms;
pub mod car_form;
pub mod category_form;
pub mod dashboard;
pub mod gallery;
pub mod list_state;
pub mod order_board;
pub mod order_forms;
pub mod storefront;
pub mod validate;

pub use account_forms::{CreateAdminForm, LoginForm};
pub use car_form::{CarForm, CarFormMode, FormPhase};
pub use category_form::{CategoryDelete, CategoryForm};
pub use dashboard::{stats, DashboardBoard, DashboardStats};
pub use gallery::{GalleryDraft, GallerySlot, MainImageSlot, Preview, PreviewWatch};
pub use list_state::{page_items, CategoryFilter, ListState, ListView, Listed, LoadMore, PageItem};
pub use order_board::{
    sell_order_stats, Carousel, CustomOrderBoard, SellOrderBoard, SellOrderStats,
};
pub use order_forms::{ContactForm, CustomOrderForm, OrderFields, SellForm};
pub use storefront::Storefront;
