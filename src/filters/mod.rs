pub mod convolution;
pub mod filter;
pub mod geometric;
pub mod kernel;
pub mod kind;
pub mod morphology;
pub mod point;
pub mod progress;
pub mod rank;
pub mod statistics;
pub mod worker;
