pub mod category;
pub mod product;
pub mod shared;
pub mod user;
