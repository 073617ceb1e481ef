pub mod caption;
pub mod compositor;
pub mod encode;
pub mod surface;
