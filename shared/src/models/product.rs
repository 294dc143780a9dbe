//! Product Model

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::money;

/// Menu category. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "PARES")]
    Pares,
    #[serde(rename = "GOTO")]
    Goto,
    #[serde(rename = "SOLO")]
    Solo,
    #[serde(rename = "ADD-ONS")]
    AddOns,
    #[serde(rename = "DRINKS")]
    Drinks,
}

impl ProductCategory {
    /// All categories in menu order
    pub const ALL: [ProductCategory; 5] = [
        Self::Pares,
        Self::Goto,
        Self::Solo,
        Self::AddOns,
        Self::Drinks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pares => "PARES",
            Self::Goto => "GOTO",
            Self::Solo => "SOLO",
            Self::AddOns => "ADD-ONS",
            Self::Drinks => "DRINKS",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Record ID ("product:xxx")
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub category: ProductCategory,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<ProductCategory>,
    pub is_active: Option<bool>,
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(())
}

impl ProductCreate {
    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        money::validate_price(self.price)
    }
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            money::validate_price(price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&ProductCategory::AddOns).unwrap();
        assert_eq!(json, "\"ADD-ONS\"");
        let cat: ProductCategory = serde_json::from_str("\"DRINKS\"").unwrap();
        assert_eq!(cat, ProductCategory::Drinks);
        assert!(serde_json::from_str::<ProductCategory>("\"DESSERT\"").is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("pares".parse::<ProductCategory>(), Ok(ProductCategory::Pares));
        assert_eq!("ADD-ONS".parse::<ProductCategory>(), Ok(ProductCategory::AddOns));
        assert!("x".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_create_validation() {
        let ok = ProductCreate {
            name: "Beef Pares".into(),
            price: Decimal::from(120),
            category: ProductCategory::Pares,
        };
        assert!(ok.validate().is_ok());

        let negative = ProductCreate {
            price: Decimal::from(-1),
            ..ok.clone()
        };
        assert!(negative.validate().is_err());

        let blank = ProductCreate {
            name: "   ".into(),
            ..ok
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_product_price_serializes_as_number() {
        let product = Product {
            id: "product:1".into(),
            name: "Iced Tea".into(),
            price: Decimal::from(25),
            category: ProductCategory::Drinks,
            is_active: true,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], 25.0);
        assert_eq!(json["category"], "DRINKS");
    }
}
