pub mod command {
    pub mod checkout_book_cmd;
    pub mod return_book_cmd;
}
pub mod domain;
pub mod dto;
pub mod factory;
