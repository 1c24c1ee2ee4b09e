use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the categorical field matched against `Criteria::product_type`
pub const TYPE_FIELD: &str = "type";
pub const DESCRIPTION_FIELD: &str = "description";
pub const PRODUCT_NAME_FIELD: &str = "product_name";

/// Placeholder used when a catalog entry has no product name
pub const MISSING_NAME: &str = "N/A";

/// A catalog entry as held by the document store.
///
/// Only `type`, `description` and `product_name` are ever read; every other
/// field is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Build a document from a JSON value, `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.get_str(DESCRIPTION_FIELD)
    }

    pub fn product_name(&self) -> Option<&str> {
        self.get_str(PRODUCT_NAME_FIELD)
    }

    /// Product name as shown in merged text. Non-string values render as
    /// JSON; a missing or null name is [`MISSING_NAME`].
    pub fn display_name(&self) -> String {
        match self.get(PRODUCT_NAME_FIELD) {
            None | Some(Value::Null) => MISSING_NAME.to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Reduce to the two fields retrieval works with.
    ///
    /// Returns `None` when the description is missing or not text. The name
    /// follows [`Document::display_name`].
    pub fn to_record(&self) -> Option<ProductRecord> {
        let description = self.description()?;
        Some(ProductRecord {
            product_name: self.display_name(),
            description: description.to_string(),
        })
    }
}

/// A retrieved document reduced to `{product_name, description}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub description: String,
}

impl ProductRecord {
    pub fn new(product_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            description: description.into(),
        }
    }

    /// Canonical text block the chunker splits
    pub fn merged_text(&self) -> String {
        format!(
            "Product Name: {}\nDescription: {}\n",
            self.product_name, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_to_record() {
        let d = doc(json!({
            "type": "product",
            "product_name": "Gentle Cream",
            "description": "Contains aloe vera",
            "price": 12.5
        }));
        let record = d.to_record().unwrap();
        assert_eq!(record.product_name, "Gentle Cream");
        assert_eq!(record.description, "Contains aloe vera");
    }

    #[test]
    fn test_missing_description_has_no_record() {
        assert!(doc(json!({"product_name": "Nameless"})).to_record().is_none());
        assert!(doc(json!({"description": null})).to_record().is_none());
    }

    #[test]
    fn test_missing_name_falls_back() {
        let record = doc(json!({"description": "plain"})).to_record().unwrap();
        assert_eq!(record.product_name, MISSING_NAME);
        let record = doc(json!({"product_name": null, "description": "plain"}))
            .to_record()
            .unwrap();
        assert_eq!(record.product_name, MISSING_NAME);
    }

    #[test]
    fn test_non_string_name_rendered_as_json() {
        let record = doc(json!({"product_name": 42, "description": "aloe"}))
            .to_record()
            .unwrap();
        assert_eq!(record.product_name, "42");
        assert_eq!(record.merged_text(), "Product Name: 42\nDescription: aloe\n");

        let record = doc(json!({"product_name": ["Duo", 2], "description": "set"}))
            .to_record()
            .unwrap();
        assert_eq!(record.product_name, r#"["Duo",2]"#);
    }

    #[test]
    fn test_merged_text() {
        let record = ProductRecord::new("Gentle Cream", "Soothing");
        assert_eq!(
            record.merged_text(),
            "Product Name: Gentle Cream\nDescription: Soothing\n"
        );
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Document::from_value(json!([1, 2])).is_none());
        assert!(Document::from_value(json!("text")).is_none());
    }
}
