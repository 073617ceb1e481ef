pub mod background;
pub mod caption;
pub mod captions;
pub mod device;
pub mod project;
