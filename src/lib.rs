pub mod domain;
pub mod usecase;
pub mod interface_adapter;
pub mod infrastructure;
pub mod shared;
