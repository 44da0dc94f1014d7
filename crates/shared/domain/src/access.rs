use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

bitflags! {
    /// The closed set of actions an actor may be granted.
    ///
    /// A single required permission is a one-bit set; role grants are unions.
    /// Keeping permissions as flags (instead of free-form strings) gives the
    /// compiler exhaustiveness over every role/permission combination.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PermissionSet: u32 {
        const INVENTORY_CREATE = 1 << 0;
        const INVENTORY_EDIT = 1 << 1;
        const INVENTORY_DELETE = 1 << 2;
        const PURCHASE_CREATE = 1 << 3;
        const QUOTATION_CREATE = 1 << 4;
        const INVOICE_CREATE = 1 << 5;
        const VOUCHER_CREATE = 1 << 6;
        const VENDOR_MANAGE = 1 << 7;
        const EXPENSE_CREATE = 1 << 8;
        const LABEL_PRINT = 1 << 9;
        const ACTIVITY_VIEW = 1 << 10;
        const REPORT_VIEW = 1 << 11;

        const ALL = Self::INVENTORY_CREATE.bits()
            | Self::INVENTORY_EDIT.bits()
            | Self::INVENTORY_DELETE.bits()
            | Self::PURCHASE_CREATE.bits()
            | Self::QUOTATION_CREATE.bits()
            | Self::INVOICE_CREATE.bits()
            | Self::VOUCHER_CREATE.bits()
            | Self::VENDOR_MANAGE.bits()
            | Self::EXPENSE_CREATE.bits()
            | Self::LABEL_PRINT.bits()
            | Self::ACTIVITY_VIEW.bits()
            | Self::REPORT_VIEW.bits();
    }
}

impl Serialize for PermissionSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_retain(bits))
    }
}

/// The closed set of actor roles.
///
/// The permission grant per role is fixed in code; there is no per-instance
/// role configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Sales,
    /// Least-privileged role; the default for unauthenticated actors.
    #[default]
    Viewer,
}

impl Role {
    /// The full permission grant for this role.
    #[must_use]
    pub const fn permissions(self) -> PermissionSet {
        match self {
            Self::Admin => PermissionSet::ALL,
            Self::Manager => PermissionSet::INVENTORY_CREATE
                .union(PermissionSet::INVENTORY_EDIT)
                .union(PermissionSet::PURCHASE_CREATE)
                .union(PermissionSet::QUOTATION_CREATE)
                .union(PermissionSet::INVOICE_CREATE)
                .union(PermissionSet::VOUCHER_CREATE)
                .union(PermissionSet::VENDOR_MANAGE)
                .union(PermissionSet::EXPENSE_CREATE)
                .union(PermissionSet::LABEL_PRINT)
                .union(PermissionSet::REPORT_VIEW),
            Self::Sales => PermissionSet::QUOTATION_CREATE
                .union(PermissionSet::INVOICE_CREATE)
                .union(PermissionSet::LABEL_PRINT)
                .union(PermissionSet::REPORT_VIEW),
            Self::Viewer => PermissionSet::REPORT_VIEW,
        }
    }

    /// Role slug as stored in session records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Sales => "SALES",
            Self::Viewer => "VIEWER",
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "ADMIN" => Self::Admin,
            "MANAGER" => Self::Manager,
            "SALES" => Self::Sales,
            _ => Self::Viewer,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
