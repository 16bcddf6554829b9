pub mod ai;
pub mod calculators;
pub mod catch;
pub mod engine;
pub mod rng;
pub mod runner;
pub mod state;

#[cfg(test)]
mod tests;
