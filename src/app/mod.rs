pub mod inspect;
pub mod pipelines;
