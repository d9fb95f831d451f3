pub mod annotation;
pub mod chart;
pub mod marketplace;
pub mod mint;
pub mod render;
pub mod settings;
