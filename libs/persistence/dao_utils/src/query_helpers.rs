use tokio_postgres::{Row, types::ToSql};

// Type aliases for PostgreSQL parameter types
pub type PgParam = dyn ToSql + Sync;
pub type PgSendParam = dyn ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

pub fn first_row_or_not_found<T, E, F>(
    rows: &[Row], mapper: F, not_found_error: E,
) -> Result<T, E>
where
    F: FnOnce(&Row) -> T,
{
    rows.first().map(mapper).ok_or(not_found_error)
}

/// Accumulates `AND`-joined conditions with numbered placeholders so the
/// same parameter list can feed a count query and a page query.
#[derive(Default)]
pub struct WhereBuilder {
    clauses: Vec<String>,
    params: PgParamVec,
}

impl WhereBuilder {
    pub fn new() -> Self { Self::default() }

    /// Adds `<expr> <op> $n` bound to `value`.
    pub fn push<T>(&mut self, expr: &str, op: &str, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        let placeholder = self.bind(value);
        self.clauses.push(format!("{expr} {op} ${placeholder}"));
        self
    }

    /// Binds a value that is referenced outside the WHERE clause (LIMIT,
    /// OFFSET) and returns its placeholder number.
    pub fn bind<T>(&mut self, value: T) -> usize
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Box::new(value));
        self.params.len()
    }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    pub fn sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        }
        else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> Vec<&PgParam> {
        self.params.iter().map(|p| p.as_ref() as &PgParam).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_has_no_where() {
        let builder = WhereBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.sql(), "");
        assert!(builder.params().is_empty());
    }

    #[test]
    fn test_placeholders_are_numbered_in_push_order() {
        let mut builder = WhereBuilder::new();
        builder
            .push("start_datetime::date", "=", "2024-01-01".to_string())
            .push("category", "=", "Olahraga".to_string());
        let limit = builder.bind(12_i64);

        assert_eq!(
            builder.sql(),
            " WHERE start_datetime::date = $1 AND category = $2"
        );
        assert_eq!(limit, 3);
        assert_eq!(builder.params().len(), 3);
    }
}
