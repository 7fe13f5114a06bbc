use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemCategory {
    Produce,
    Meat,
    Dairy,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
    #[default]
    Other,
}

impl ItemCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Produce => "Produce",
            ItemCategory::Meat => "Meat & Seafood",
            ItemCategory::Dairy => "Dairy & Eggs",
            ItemCategory::Bakery => "Bakery",
            ItemCategory::Pantry => "Pantry",
            ItemCategory::Frozen => "Frozen",
            ItemCategory::Beverages => "Beverages",
            ItemCategory::Snacks => "Snacks",
            ItemCategory::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_lowercase_names() {
        assert_eq!(ItemCategory::Meat.to_string(), "meat");
        assert_eq!(ItemCategory::from_str("dairy").unwrap(), ItemCategory::Dairy);
        assert_eq!(ItemCategory::default().label(), "Other");
    }
}
