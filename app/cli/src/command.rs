pub mod speak;
pub mod translate;
pub mod voices;
