pub mod queue;
pub mod keys;
