pub mod db_utils;
pub mod error;
pub mod extract;
pub mod i18n;
pub mod pagination;
pub mod patch;
pub mod validation;
