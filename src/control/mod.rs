//! UDP control plane: subscription and command listeners

pub mod command;
pub mod parse;
pub mod subscription;

pub use command::CommandListener;
pub use subscription::SubscriptionListener;
