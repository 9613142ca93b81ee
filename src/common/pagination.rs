// src/common/pagination.rs

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

pub const DEFAULT_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Parâmetros `skip`/`limit` das listagens.
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Quantas linhas pular
    #[serde(default)]
    #[validate(range(min = 0, message = "skip não pode ser negativo."))]
    #[param(default = 0, minimum = 0)]
    pub skip: i64,

    /// Máximo de linhas devolvidas
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit deve estar entre 1 e 1000."))]
    #[param(default = 100, minimum = 1, maximum = 1000)]
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: DEFAULT_LIMIT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_when_absent() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!((p.skip, p.limit), (0, 100));
        assert!(p.validate().is_ok());
    }

    #[rstest]
    #[case(-1, 10)]
    #[case(0, 0)]
    #[case(0, 1001)]
    fn rejects_out_of_range(#[case] skip: i64, #[case] limit: i64) {
        assert!(Pagination { skip, limit }.validate().is_err());
    }
}
