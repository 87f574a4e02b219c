use std::{fmt, str::FromStr};

use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_postgres::types::{FromSql, IsNull, ToSql, Type};
use utoipa::ToSchema;

/// Fixed classification of an event. The spelling of each variant is the
/// value shown to users and stored in the `events.category` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum Category {
    #[default]
    Umum,
    Pemuda,
    Budaya,
    Olahraga,
    Pariwisata,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event category: {0}")]
pub struct InvalidCategory(pub String);

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Umum,
        Category::Pemuda,
        Category::Budaya,
        Category::Olahraga,
        Category::Pariwisata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Umum => "Umum",
            Category::Pemuda => "Pemuda",
            Category::Budaya => "Budaya",
            Category::Olahraga => "Olahraga",
            Category::Pariwisata => "Pariwisata",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

impl ToSql for Category {
    tokio_postgres::types::to_sql_checked!();

    fn to_sql(
        &self, ty: &Type, out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        self.as_str().to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool { <&str as ToSql>::accepts(ty) }
}

impl<'a> FromSql<'a> for Category {
    fn from_sql(
        ty: &Type, raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let value = <&str as FromSql>::from_sql(ty, raw)?;
        Ok(value.parse()?)
    }

    fn accepts(ty: &Type) -> bool { <&str as FromSql>::accepts(ty) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_category() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "olahraga".parse::<Category>(),
            Err(InvalidCategory("olahraga".to_string()))
        );
        assert!("Sports".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::Pariwisata).unwrap();
        assert_eq!(json, "\"Pariwisata\"");

        let parsed: Category = serde_json::from_str("\"Budaya\"").unwrap();
        assert_eq!(parsed, Category::Budaya);
    }

    #[test]
    fn test_default_is_umum() {
        assert_eq!(Category::default(), Category::Umum);
    }
}
