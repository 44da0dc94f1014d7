use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Accounting voucher kinds and their fixed 3-letter number prefixes.
///
/// The codes are embedded in issued voucher numbers (`EXP/2024/000042`), so
/// they must never change for kinds that already have documents on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoucherKind {
    Expense,
    Payment,
    Receipt,
    Reversal,
}

impl VoucherKind {
    /// The 3-letter prefix used in voucher numbers.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Expense => "EXP",
            Self::Payment => "PAY",
            Self::Receipt => "RCT",
            Self::Reversal => "REV",
        }
    }

    pub const ALL: [Self; 4] = [Self::Expense, Self::Payment, Self::Receipt, Self::Reversal];
}

impl std::fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for VoucherKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXP" | "EXPENSE" => Ok(Self::Expense),
            "PAY" | "PAYMENT" => Ok(Self::Payment),
            "RCT" | "RECEIPT" => Ok(Self::Receipt),
            "REV" | "REVERSAL" => Ok(Self::Reversal),
            _ => Err(()),
        }
    }
}
