use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn isbn(&self) -> &str;
    fn is_lent(&self) -> bool;
    fn book_type(&self) -> &'static str;
}
