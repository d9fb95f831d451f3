pub mod annotation_service;
pub mod chart_service;
pub mod creator_service;
pub mod marketplace_service;

// Plumbing shared by the views
pub mod event_bus;
pub mod lifetime;
