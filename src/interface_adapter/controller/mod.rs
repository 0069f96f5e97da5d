pub mod simulator_controller;

pub use simulator_controller::{SimAction, SimulatorController};
