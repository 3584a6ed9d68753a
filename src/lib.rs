//! In-memory library management console: a catalog of printed and electronic
//! books, a single registered patron and the lending state between them.

pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod events;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod logs;
    pub mod memory;
}

pub mod books {
    pub mod domain;
    pub mod dto;
    pub mod factory;
    pub mod repository;
}

pub mod catalog {
    pub mod command {
        pub mod add_book_cmd;
        pub mod list_available_cmd;
        pub mod remove_book_cmd;
    }
    pub mod domain;
    pub mod factory;
}

pub mod patrons;
pub mod checkout;
pub mod gateway;
pub mod session;
