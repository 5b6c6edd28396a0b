pub mod connector;
pub mod error;
pub mod payload;
pub mod vision_client;
