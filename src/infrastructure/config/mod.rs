//! Configuration persistence adapters

mod xdg;

pub use xdg::XdgConfigStore;
