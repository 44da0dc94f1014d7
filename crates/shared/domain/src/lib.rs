//! Pure domain model for the KaratGems trading core.
//! Keep this crate free of I/O and heavy dependencies; it defines the closed
//! enumerations (roles, permissions, voucher kinds, weight units) and the
//! serde configuration tree shared by every slice.

pub mod access;
pub mod config;
pub mod vouchers;
pub mod weight;

pub use access::{PermissionSet, Role};
pub use vouchers::VoucherKind;
pub use weight::WeightUnit;
