// Application layer - Push use case and its transport seam
pub mod push_transport;
pub mod widget_pusher;
