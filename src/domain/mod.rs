pub mod speech;
pub mod voices;
