// src/common/db_utils.rs

use sqlx::{Encode, Postgres, QueryBuilder, Type};
use uuid::Uuid;

use crate::common::error::{AppError, Entity};

// ---
// Helper de UPDATE parcial: só entra no SET o que veio no patch
// ---
pub(crate) struct UpdateBuilder<'args> {
    qb: QueryBuilder<'args, Postgres>,
}

impl<'args> UpdateBuilder<'args> {
    /// `table` é sempre uma constante do repositório, nunca entrada do usuário.
    pub fn new(table: &'static str) -> Self {
        // updated_at sempre muda, o que também evita um SET vazio
        let qb = QueryBuilder::new(format!("UPDATE {} SET updated_at = NOW()", table));
        Self { qb }
    }

    pub fn set<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        self.qb.push(", ").push(column).push(" = ").push_bind(value);
        self
    }

    pub fn set_opt<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres>,
    {
        if let Some(v) = value {
            self.set(column, v);
        }
        self
    }

    /// Fecha a query com `WHERE id = $n RETURNING *`.
    pub fn finish(mut self, id: Uuid) -> QueryBuilder<'args, Postgres> {
        self.qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        self.qb
    }

    #[cfg(test)]
    pub fn sql(mut self, id: Uuid) -> String {
        self.qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        self.qb.sql().to_string()
    }
}

/// Traduz violações de FK numa escrita para "referência inválida".
///
/// O campo sai do nome da constraint (`<tabela>_<coluna>_fkey`, o padrão do
/// Postgres); `fields` lista as colunas candidatas e a primeira é o fallback.
pub(crate) fn map_fk_violation(e: sqlx::Error, fields: &[&'static str]) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            let field = fk_field(db_err.constraint(), fields);
            return AppError::InvalidReference(field);
        }
    }
    e.into()
}

fn fk_field(constraint: Option<&str>, fields: &[&'static str]) -> &'static str {
    constraint
        .and_then(|c| {
            fields
                .iter()
                .copied()
                .find(|f| c.ends_with(&format!("_{}_fkey", f)))
        })
        .or_else(|| fields.first().copied())
        .unwrap_or("id")
}

/// Estouro de `NUMERIC` (SQLSTATE 22003) vira erro de validação no campo.
pub(crate) fn map_numeric_overflow(
    e: sqlx::Error,
    field: &'static str,
    message: &'static str,
) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("22003") {
            return AppError::field(field, "range", message);
        }
    }
    e.into()
}

/// Traduz violações de FK num DELETE para "ainda referenciado".
pub(crate) fn map_delete_violation(e: sqlx::Error, entity: Entity) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::StillReferenced(entity);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_columns_enter_the_set_clause() {
        let mut builder = UpdateBuilder::new("alunos");
        builder
            .set("nome", "Ana".to_string())
            .set_opt::<String>("percentual_desconto", None);

        let sql = builder.sql(Uuid::nil());
        assert_eq!(
            sql,
            "UPDATE alunos SET updated_at = NOW(), nome = $1 WHERE id = $2 RETURNING *"
        );
    }

    #[test]
    fn fk_field_follows_the_violated_constraint() {
        let fields = &["cliente_id", "quadra_id"];
        assert_eq!(fk_field(Some("agendamentos_quadra_id_fkey"), fields), "quadra_id");
        assert_eq!(fk_field(Some("agendamentos_cliente_id_fkey"), fields), "cliente_id");
        // Constraint desconhecida ou ausente cai no primeiro candidato
        assert_eq!(fk_field(Some("outra_constraint"), fields), "cliente_id");
        assert_eq!(fk_field(None, fields), "cliente_id");
    }

    #[test]
    fn empty_patch_still_produces_valid_sql() {
        let sql = UpdateBuilder::new("quadras").sql(Uuid::nil());
        assert_eq!(sql, "UPDATE quadras SET updated_at = NOW() WHERE id = $1 RETURNING *");
    }
}
