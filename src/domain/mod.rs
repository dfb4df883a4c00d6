// Domain layer - Widget payload shapes
pub mod payload;
pub mod widget;
