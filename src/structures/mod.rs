pub mod factor;
pub mod modint;
pub mod poly;
pub mod poly_field;
