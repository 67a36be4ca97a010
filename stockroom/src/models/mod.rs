pub mod product;

pub use product::{Product, ProductCreate, ProductField, ProductUpdate};
