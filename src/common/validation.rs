// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::common::error::AppError;

/// Teto das colunas de dinheiro, `NUMERIC(10, 2)`.
pub const MONEY_MAX: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

const MAX_CASAS_DECIMAIS: u32 = 2;

// Zeros à direita não contam: 50.500 é gravado como 50.50
fn casas_decimais(val: &Decimal) -> u32 {
    val.normalize().scale()
}

/// Valor monetário: não negativo, abaixo de `MONEY_MAX` e com até 2 casas.
pub fn validate_money(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    if *val >= MONEY_MAX {
        let mut err = ValidationError::new("range");
        err.add_param("max".into(), &99_999_999.99);
        err.message = Some("O valor deve ser menor que 100.000.000.".into());
        return Err(err);
    }
    if casas_decimais(val) > MAX_CASAS_DECIMAIS {
        let mut err = ValidationError::new("scale");
        err.add_param("max".into(), &MAX_CASAS_DECIMAIS);
        err.message = Some("O valor aceita no máximo 2 casas decimais.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_percentual(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO || *val > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.add_param("max".into(), &100.0);
        err.message = Some("O percentual deve estar entre 0 e 100.".into());
        return Err(err);
    }
    if casas_decimais(val) > MAX_CASAS_DECIMAIS {
        let mut err = ValidationError::new("scale");
        err.add_param("max".into(), &MAX_CASAS_DECIMAIS);
        err.message = Some("O percentual aceita no máximo 2 casas decimais.".into());
        return Err(err);
    }
    Ok(())
}

/// Aplica um validador de campo fora do derive (usado nos patches).
pub fn check_field<T: ?Sized>(
    field: &'static str,
    value: &T,
    validate: fn(&T) -> Result<(), ValidationError>,
) -> Result<(), AppError> {
    validate(value).map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, e);
        AppError::ValidationError(errors)
    })
}

pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

/// Username não pode ter `@`, senão colide com e-mails no login.
pub fn validate_username(val: &str) -> Result<(), ValidationError> {
    if val.contains('@') {
        let mut err = ValidationError::new("username");
        err.message = Some("O username não pode conter '@'.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::ZERO, true)]
    #[case(Decimal::new(105, 1), true)]
    #[case(Decimal::ONE_HUNDRED, true)]
    #[case(Decimal::new(-1, 0), false)]
    #[case(Decimal::new(10001, 2), false)]
    #[case(Decimal::new(12555, 3), false)]
    #[case(Decimal::new(12500, 3), true)]
    fn percentual_bounds(#[case] value: Decimal, #[case] ok: bool) {
        assert_eq!(validate_percentual(&value).is_ok(), ok);
    }

    #[rstest]
    #[case(Decimal::ZERO, true)]
    #[case(Decimal::new(5055, 2), true)]
    #[case(Decimal::new(50500, 3), true)]
    #[case(Decimal::new(9_999_999_999, 2), true)]
    #[case(Decimal::new(-5, 1), false)]
    #[case(Decimal::new(50555, 3), false)]
    #[case(Decimal::new(100_000_000, 0), false)]
    #[case(Decimal::new(1_000_000_000, 0), false)]
    fn money_fits_the_column(#[case] value: Decimal, #[case] ok: bool) {
        assert_eq!(validate_money(&value).is_ok(), ok);
    }

    #[test]
    fn money_error_codes_tell_range_from_scale() {
        assert_eq!(validate_money(&Decimal::new(-1, 0)).unwrap_err().code, "range");
        assert_eq!(validate_money(&MONEY_MAX).unwrap_err().code, "range");
        assert_eq!(validate_money(&Decimal::new(1001, 3)).unwrap_err().code, "scale");
    }

    #[rstest]
    #[case("bob", true)]
    #[case("bob.silva_2", true)]
    #[case("bob@x.com", false)]
    #[case("@bob", false)]
    fn usernames_cannot_look_like_emails(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(validate_username(value).is_ok(), ok);
    }

    #[test]
    fn check_field_wraps_into_validation_error() {
        let err = check_field("percentual_desconto", &Decimal::new(-1, 0), validate_percentual)
            .unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("percentual_desconto"));
            }
            other => panic!("erro inesperado: {:?}", other),
        }
    }
}
