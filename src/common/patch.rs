// src/common/patch.rs

use serde::{Deserialize, Deserializer};

use crate::common::error::AppError;

/// Um campo de atualização parcial.
///
/// Distingue "não enviado" (`Missing`) de "enviado como null" (`Null`).
/// Use sempre com `#[serde(default)]` para que campos ausentes virem `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Para colunas NOT NULL: `null` explícito é erro de validação.
    pub fn into_required(self, field: &'static str) -> Result<Option<T>, AppError> {
        match self {
            Patch::Missing => Ok(None),
            Patch::Value(v) => Ok(Some(v)),
            Patch::Null => Err(AppError::field(
                field,
                "null",
                "Este campo não pode ser nulo.",
            )),
        }
    }

    /// Para colunas anuláveis: `Some(None)` limpa o valor.
    pub fn into_nullable(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }
}
