use crate::modules::common::query::SortDirection;
use diesel::dsl::{Asc, Desc};
use diesel::expression::expression_types::NotSelectable;
use diesel::pg::Pg;
use diesel::prelude::*;

/// A `ORDER BY` clause chosen at runtime
pub type DynOrder<QS> = Box<dyn BoxableExpression<QS, Pg, SqlType = NotSelectable>>;

/// orders by `column` in the given direction
pub fn order_by<QS, C>(column: C, direction: SortDirection) -> DynOrder<QS>
where
    C: ExpressionMethods,
    Asc<C>: BoxableExpression<QS, Pg, SqlType = NotSelectable> + 'static,
    Desc<C>: BoxableExpression<QS, Pg, SqlType = NotSelectable> + 'static,
{
    match direction {
        SortDirection::Asc => Box::new(column.asc()),
        SortDirection::Desc => Box::new(column.desc()),
    }
}

/// `ILIKE` pattern matching values that contain `term` literally
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }

    pattern.push('%');
    pattern
}

/// case insensitive literal substring check, the in memory
/// counterpart of `ILIKE contains_pattern(term)`
pub fn contains_ignore_case(value: &str, term: &str) -> bool {
    term.is_empty() || value.to_lowercase().contains(&term.to_lowercase())
}
