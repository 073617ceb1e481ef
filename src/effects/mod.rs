pub mod composite;
pub mod mask;
