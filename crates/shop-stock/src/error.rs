use shop_core::Category;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("cannot shelve a {got} item in the {expected} section")]
    WrongCategory { expected: Category, got: Category },
}

pub type StockResult<T> = Result<T, StockError>;
