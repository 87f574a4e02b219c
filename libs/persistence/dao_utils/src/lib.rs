pub mod pagination;
pub mod query_helpers;

pub use pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE, PageRequest, Paginated};
pub use query_helpers::{
    PgParam, PgParamBox, PgParamVec, PgSendParam, WhereBuilder,
    first_row_or_not_found,
};
