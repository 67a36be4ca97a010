//! SQL text generation for single-table statements.
//!
//! The builder only produces SQL with `?` placeholders; values are bound by
//! the caller with `sqlx::query(..).bind(..)` in placeholder order. Every
//! identifier is checked before it is written into the statement.
//!
//! ```ignore
//! let sql = QueryBuilder::new("products")
//!     .where_eq("id")
//!     .build_select(&["id", "name"])?;
//! assert_eq!(sql, "SELECT id, name FROM products WHERE id = ?");
//! ```

use crate::entity::Entity;

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    conditions: Vec<String>,
    order: Vec<(String, bool)>,
    limit: bool,
    offset: bool,
    returning: Vec<String>,
}

impl QueryBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit: false,
            offset: false,
            returning: Vec::new(),
        }
    }

    /// Add a `column = ?` condition; conditions are joined with `AND`.
    pub fn where_eq(mut self, column: &str) -> Self {
        self.conditions.push(column.to_string());
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push((column.to_string(), ascending));
        self
    }

    /// Append `LIMIT ?`, bound after the condition values.
    pub fn limit(mut self) -> Self {
        self.limit = true;
        self
    }

    /// Append `OFFSET ?`, bound after the limit value.
    pub fn offset(mut self) -> Self {
        self.offset = true;
        self
    }

    /// Append `RETURNING <columns>` to INSERT, UPDATE and DELETE statements.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build_select(&self, columns: &[&str]) -> Result<String, QueryError> {
        let mut sql = format!(
            "SELECT {} FROM {}",
            column_list(columns)?,
            checked(&self.table, "table")?
        );
        self.append_where(&mut sql)?;
        self.append_order(&mut sql)?;
        if self.limit {
            sql.push_str(" LIMIT ?");
        } else if self.offset {
            // SQLite only accepts OFFSET after a LIMIT clause.
            sql.push_str(" LIMIT -1");
        }
        if self.offset {
            sql.push_str(" OFFSET ?");
        }
        Ok(sql)
    }

    pub fn build_count(&self) -> Result<String, QueryError> {
        let mut sql = format!("SELECT COUNT(*) FROM {}", checked(&self.table, "table")?);
        self.append_where(&mut sql)?;
        Ok(sql)
    }

    pub fn build_insert(&self, columns: &[&str]) -> Result<String, QueryError> {
        let placeholders = vec!["?"; columns.len()].join(", ");
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            checked(&self.table, "table")?,
            column_list(columns)?
        );
        self.append_returning(&mut sql)?;
        Ok(sql)
    }

    /// `UPDATE .. SET c1 = ?, c2 = ? WHERE ..`; set values bind before
    /// condition values.
    pub fn build_update(&self, columns: &[&str]) -> Result<String, QueryError> {
        if self.conditions.is_empty() {
            return Err(QueryError::Unconditional("UPDATE"));
        }
        if columns.is_empty() {
            return Err(QueryError::NothingToSet);
        }
        let assignments = columns
            .iter()
            .map(|c| checked(c, "column").map(|c| format!("{c} = ?")))
            .collect::<Result<Vec<_>, _>>()?;
        let mut sql = format!(
            "UPDATE {} SET {}",
            checked(&self.table, "table")?,
            assignments.join(", ")
        );
        self.append_where(&mut sql)?;
        self.append_returning(&mut sql)?;
        Ok(sql)
    }

    pub fn build_delete(&self) -> Result<String, QueryError> {
        if self.conditions.is_empty() {
            return Err(QueryError::Unconditional("DELETE"));
        }
        let mut sql = format!("DELETE FROM {}", checked(&self.table, "table")?);
        self.append_where(&mut sql)?;
        self.append_returning(&mut sql)?;
        Ok(sql)
    }

    fn append_where(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.conditions.is_empty() {
            return Ok(());
        }
        let clauses = self
            .conditions
            .iter()
            .map(|c| checked(c, "column").map(|c| format!("{c} = ?")))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
        Ok(())
    }

    fn append_returning(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.returning.is_empty() {
            return Ok(());
        }
        let columns: Vec<&str> = self.returning.iter().map(String::as_str).collect();
        sql.push_str(" RETURNING ");
        sql.push_str(&column_list(&columns)?);
        Ok(())
    }

    fn append_order(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.order.is_empty() {
            return Ok(());
        }
        let clauses = self
            .order
            .iter()
            .map(|(col, asc)| {
                checked(col, "column").map(|c| format!("{c} {}", if *asc { "ASC" } else { "DESC" }))
            })
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(" ORDER BY ");
        sql.push_str(&clauses.join(", "));
        Ok(())
    }
}

/// The full set of CRUD statements for one entity, generated once.
#[derive(Debug, Clone)]
pub struct EntityStatements {
    /// `SELECT <all> FROM t WHERE id = ?`
    pub select_by_id: String,
    /// `SELECT <all> FROM t ORDER BY id ASC LIMIT ? OFFSET ?`
    pub select_page: String,
    /// `INSERT INTO t (<values>) VALUES (?, ..) RETURNING <all>`
    pub insert: String,
    /// `DELETE FROM t WHERE id = ?`
    pub delete: String,
    /// `SELECT COUNT(*) FROM t`
    pub count: String,
}

impl EntityStatements {
    pub fn for_entity<T: Entity>() -> Result<Self, QueryError> {
        let table = T::table_name();
        let id = T::id_column();
        let values = T::value_columns();
        let by_id = QueryBuilder::new(table).where_eq(id);

        Ok(Self {
            select_by_id: by_id.build_select(T::columns())?,
            select_page: QueryBuilder::new(table)
                .order_by(id, true)
                .limit()
                .offset()
                .build_select(T::columns())?,
            insert: QueryBuilder::new(table)
                .returning(T::columns())
                .build_insert(&values)?,
            delete: by_id.build_delete()?,
            count: QueryBuilder::new(table).build_count()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
    Unconditional(&'static str),
    /// An UPDATE with an empty SET list.
    NothingToSet,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
            QueryError::Unconditional(stmt) => write!(f, "{stmt} without a WHERE clause"),
            QueryError::NothingToSet => write!(f, "UPDATE without any column to set"),
        }
    }
}

impl std::error::Error for QueryError {}

fn column_list(columns: &[&str]) -> Result<String, QueryError> {
    let cols = columns
        .iter()
        .map(|c| checked(c, "column"))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(cols.join(", "))
}

fn checked<'a>(ident: &'a str, kind: &'static str) -> Result<&'a str, QueryError> {
    if is_valid_identifier(ident) {
        Ok(ident)
    } else {
        Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        })
    }
}

fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        id: i64,
    }

    impl Entity for Widget {
        type Id = i64;
        fn table_name() -> &'static str {
            "widgets"
        }
        fn id_column() -> &'static str {
            "id"
        }
        fn columns() -> &'static [&'static str] {
            &["id", "name", "weight"]
        }
        fn id(&self) -> &i64 {
            &self.id
        }
    }

    #[test]
    fn simple_select() {
        let sql = QueryBuilder::new("widgets").build_select(&["id", "name"]).unwrap();
        assert_eq!(sql, "SELECT id, name FROM widgets");
    }

    #[test]
    fn paged_select() {
        let sql = QueryBuilder::new("widgets")
            .order_by("id", true)
            .limit()
            .offset()
            .build_select(&["id"])
            .unwrap();
        assert_eq!(sql, "SELECT id FROM widgets ORDER BY id ASC LIMIT ? OFFSET ?");
    }

    #[test]
    fn offset_without_limit() {
        let sql = QueryBuilder::new("widgets").offset().build_select(&["id"]).unwrap();
        assert_eq!(sql, "SELECT id FROM widgets LIMIT -1 OFFSET ?");
    }

    #[test]
    fn update_and_delete_need_a_condition() {
        let q = QueryBuilder::new("widgets");
        assert_eq!(q.build_update(&["name"]), Err(QueryError::Unconditional("UPDATE")));
        assert_eq!(q.build_delete(), Err(QueryError::Unconditional("DELETE")));
    }

    #[test]
    fn update_sets_only_given_columns() {
        let sql = QueryBuilder::new("widgets")
            .where_eq("id")
            .returning(&["id", "name", "weight"])
            .build_update(&["weight"])
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE widgets SET weight = ? WHERE id = ? RETURNING id, name, weight"
        );
        let err = QueryBuilder::new("widgets").where_eq("id").build_update(&[]).unwrap_err();
        assert_eq!(err, QueryError::NothingToSet);
    }

    #[test]
    fn invalid_identifier() {
        let err = QueryBuilder::new("widgets;drop").build_count().unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { kind: "table", .. }));
        let err = QueryBuilder::new("widgets")
            .build_select(&["name, 1"])
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier { kind: "column", .. }));
    }

    #[test]
    fn entity_statements() {
        let s = EntityStatements::for_entity::<Widget>().unwrap();
        assert_eq!(s.select_by_id, "SELECT id, name, weight FROM widgets WHERE id = ?");
        assert_eq!(
            s.select_page,
            "SELECT id, name, weight FROM widgets ORDER BY id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(
            s.insert,
            "INSERT INTO widgets (name, weight) VALUES (?, ?) RETURNING id, name, weight"
        );
        assert_eq!(s.delete, "DELETE FROM widgets WHERE id = ?");
        assert_eq!(s.count, "SELECT COUNT(*) FROM widgets");
        assert_eq!(Widget { id: 4 }.id(), &4);
    }
}
