pub mod activity_log;
pub mod admin;
pub mod complaint;
pub mod notification;
pub mod reference;
