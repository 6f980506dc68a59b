//! # Wire Models
//!
//! Entities exchanged with the dealership backend. The client holds no
//! authoritative state; these are cached copies, normalized at the
//! deserialization boundary so the rest of the crate only ever sees
//! clean shapes (galleries are always ordered URL lists, enums are
//! closed).

pub mod account;
pub mod car;
pub mod category;
pub mod images;
pub mod order;

pub use account::{Credentials, LoginResponse, NewAdmin};
pub use car::{Car, CarPayload, FuelType, GearType};
pub use category::{Category, CategoryPayload, CategoryGlyph};
pub use order::{
    Condition, ConditionTone, ContactMessage, CustomOrder, CustomOrderPayload, SellOrder,
    SellOrderPayload,
};
