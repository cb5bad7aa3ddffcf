pub mod category;
pub mod topic;
pub mod tutor;
pub mod tutor_period;

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{EntityName, IdenStatic};

/// `LOWER(<table>.<column>) = <value lowercased>`.
///
/// SQLite's `LOWER` only folds ASCII, so the value side is folded the same way.
pub(crate) fn lower_eq<E, C>(column: C, value: &str) -> SimpleExpr
where
    E: EntityName + Default,
    C: IdenStatic,
{
    Expr::expr(Func::lower(Expr::col((E::default(), column)))).eq(value.to_ascii_lowercase())
}
