use serde::{Deserialize, Serialize};

/// A stored product, as handed to the reporting pipeline.
///
/// Every field is always populated; stores coerce missing columns to empty
/// text or zero before building a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub reference: String,
    pub price: f64,
    pub weight: f64,
    pub category: String,
    pub stock: i32,
}

impl ProductRecord {
    pub fn from_new(id: i64, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            reference: product.reference,
            price: product.price,
            weight: product.weight,
            category: product.category,
            stock: product.stock,
        }
    }
}

/// Create/update payload: a product without its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub reference: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i32,
}

impl NewProduct {
    /// Returns every violated constraint, or `Ok(())` when the payload is acceptable.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name must not be blank".to_string());
        }
        if self.reference.trim().is_empty() {
            problems.push("reference must not be blank".to_string());
        }
        if self.price.is_nan() || self.price < 0.0 {
            problems.push("price must be a non-negative number".to_string());
        }
        if self.weight.is_nan() || self.weight < 0.0 {
            problems.push("weight must be a non-negative number".to_string());
        }
        if self.stock < 0 {
            problems.push("stock must not be negative".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
