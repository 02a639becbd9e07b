pub mod constraint;
pub mod dlx;
pub mod error;
pub mod input;
pub mod output;
pub mod pool;
pub mod queue;

// Necessary to export the modules to be integration tested in 'tests'
