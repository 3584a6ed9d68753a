pub mod command {
    pub mod add_patron_cmd;
    pub mod get_patron_cmd;
}
pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;
