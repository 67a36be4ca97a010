use garde::Validate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use stockroom_data::Entity;

/// A stored inventory item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

impl Entity for Product {
    type Id = i64;

    fn table_name() -> &'static str {
        "products"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "description", "price", "quantity"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

const DESCRIPTION_MAX_CHARS: usize = 300;

/// Body of `POST /products`.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, JsonSchema)]
pub struct ProductCreate {
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[garde(custom(description_length))]
    #[serde(default)]
    pub description: Option<String>,
    #[garde(custom(positive_price))]
    pub price: f64,
    #[garde(range(min = 0))]
    pub quantity: i64,
}

/// Body of `PUT /products/{id}`.
///
/// A missing key leaves the stored value untouched. `description` is the one
/// nullable column, so it keeps three states: missing, `null` (clear) and a
/// string (replace). For the other fields `null` counts as missing.
#[derive(Clone, Debug, Default, Deserialize, Validate, JsonSchema)]
pub struct ProductUpdate {
    #[garde(length(chars, min = 1, max = 100))]
    #[serde(default)]
    pub name: Option<String>,
    #[garde(custom(description_patch))]
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "Option<String>")]
    pub description: Option<Option<String>>,
    #[garde(custom(positive_price_if_set))]
    #[serde(default)]
    pub price: Option<f64>,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// One column assignment of a partial update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProductField<'a> {
    Name(&'a str),
    Description(Option<&'a str>),
    Price(f64),
    Quantity(i64),
}

impl ProductField<'_> {
    pub fn column(&self) -> &'static str {
        match self {
            ProductField::Name(_) => "name",
            ProductField::Description(_) => "description",
            ProductField::Price(_) => "price",
            ProductField::Quantity(_) => "quantity",
        }
    }
}

impl ProductUpdate {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// The present fields, in column order. The id is never among them.
    pub fn changes(&self) -> Vec<ProductField<'_>> {
        let mut fields = Vec::with_capacity(4);
        if let Some(name) = &self.name {
            fields.push(ProductField::Name(name));
        }
        if let Some(description) = &self.description {
            fields.push(ProductField::Description(description.as_deref()));
        }
        if let Some(price) = self.price {
            fields.push(ProductField::Price(price));
        }
        if let Some(quantity) = self.quantity {
            fields.push(ProductField::Quantity(quantity));
        }
        fields
    }
}

/// Deserialize a key that is present (possibly `null`) as `Some(..)`.
/// Together with `#[serde(default)]` a missing key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn positive_price(value: &f64, _ctx: &()) -> garde::Result {
    if *value > 0.0 {
        Ok(())
    } else {
        Err(garde::Error::new("must be greater than 0"))
    }
}

fn positive_price_if_set(value: &Option<f64>, ctx: &()) -> garde::Result {
    match value {
        Some(price) => positive_price(price, ctx),
        None => Ok(()),
    }
}

fn description_length(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(text) if text.chars().count() > DESCRIPTION_MAX_CHARS => Err(garde::Error::new(
            format!("length is greater than {DESCRIPTION_MAX_CHARS}"),
        )),
        _ => Ok(()),
    }
}

fn description_patch(value: &Option<Option<String>>, ctx: &()) -> garde::Result {
    match value {
        Some(description) => description_length(description, ctx),
        None => Ok(()),
    }
}
