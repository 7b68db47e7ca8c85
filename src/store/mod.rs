//! Per-collection document access: create, find by id, filtered listing,
//! update, delete and count. Each call is a single query; nothing here spans
//! more than one document write.

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

mod categories;
mod deals;
mod products;

pub use categories::CategoryStore;
pub use deals::DealStore;
pub use products::{ProductFilter, ProductStore};

/// Skip/limit window applied after the newest-first sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub skip: u64,
    pub limit: Option<u64>,
}

impl FindOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }
}

/// Case-insensitive substring match on a text column.
pub(crate) fn contains_ci(column: impl IntoColumnRef, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Store timestamps at microsecond precision so every backend round-trips them.
pub(crate) fn now() -> DateTime<FixedOffset> {
    Utc::now().trunc_subsecs(6).fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("red"), "red");
    }
}
