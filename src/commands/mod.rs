pub mod compare;
pub mod input;
pub mod tutorial;
