use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

/// Query helpers shared by the soft-delete tables.
pub trait SelectExt: Sized {
    /// Keep rows whose `deleted_at` column is `NULL`.
    fn not_deleted<C: ColumnTrait>(self, deleted_at: C) -> Self;

    /// `col LIKE %value%` when `value` is present and non-blank; no-op otherwise.
    fn contains_opt<C: ColumnTrait>(self, col: C, value: Option<&str>) -> Self;
}

impl<E> SelectExt for Select<E>
where
    E: EntityTrait,
{
    fn not_deleted<C: ColumnTrait>(self, deleted_at: C) -> Self {
        self.filter(deleted_at.is_null())
    }

    fn contains_opt<C: ColumnTrait>(self, col: C, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.filter(col.contains(v)),
            None => self,
        }
    }
}
