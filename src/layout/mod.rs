pub mod caption_box;
pub mod placement;
