//! Trait boundaries between the engine core and its adapters

pub mod observer;
pub mod policy;

pub use observer::Observer;
pub use policy::Policy;
