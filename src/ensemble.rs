//! The four-model ensemble and its blended prediction.
mod blender;
mod trainer;


pub use blender::Blend;
pub use trainer::EnsembleTrainer;
