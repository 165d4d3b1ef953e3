pub mod cell;
pub mod color;
pub mod geometry;
pub mod product;

pub use cell::CellValue;
pub use color::Color;
pub use geometry::{Rect, Size};
pub use product::{NewProduct, ProductRecord};
