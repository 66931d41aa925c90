pub mod dto;
pub mod place;
pub mod trip;
