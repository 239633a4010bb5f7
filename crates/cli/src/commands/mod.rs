pub mod generate;
pub mod inspect;
pub mod mix;
pub mod verify;
