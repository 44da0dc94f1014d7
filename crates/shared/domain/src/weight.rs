use serde::{Deserialize, Serialize};

/// Units a gemstone lot can be weighed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Carat,
    Gram,
    Kilogram,
}

impl WeightUnit {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Carat => "ct",
            Self::Gram => "g",
            Self::Kilogram => "kg",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
