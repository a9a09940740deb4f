pub mod eval;
#[allow(clippy::module_inception)]
pub mod search;
pub mod tt;
