/// Trait representing a database entity with a table name, id column, and column list.
///
/// ```ignore
/// impl Entity for Product {
///     type Id = i64;
///     fn table_name() -> &'static str { "products" }
///     fn id_column() -> &'static str { "id" }
///     fn columns() -> &'static [&'static str] { &["id", "name", "price"] }
///     fn id(&self) -> &i64 { &self.id }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Copy + Send + Sync + std::fmt::Display + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;
    /// Every column, the id column included, in select order.
    fn columns() -> &'static [&'static str];
    fn id(&self) -> &Self::Id;

    /// Columns written on insert/update: everything but the id column.
    fn value_columns() -> Vec<&'static str> {
        Self::columns()
            .iter()
            .copied()
            .filter(|c| *c != Self::id_column())
            .collect()
    }
}
