pub mod chonk;
pub mod iterative;
pub mod parallel;
pub mod recursive;

pub use chonk::Chonk;
pub use iterative::IterativeReader;
pub use parallel::ParallelReader;
pub use recursive::RecursiveReader;
