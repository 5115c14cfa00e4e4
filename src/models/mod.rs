//! Concrete physical models
//!
//! Each model implements [`PhysicalModel`](crate::physics::PhysicalModel)
//! and encapsulates its equations plus any precomputed discretization
//! data. Solvers never see anything model-specific.

mod burgers;

pub use burgers::BurgersModel;
