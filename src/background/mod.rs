pub mod fit;
pub mod gradient;
pub mod resolve;
