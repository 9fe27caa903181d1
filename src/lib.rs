pub mod layer;
pub mod protocol;
pub mod utils;
