//! Local, CPU-bound filter stages.
//!
//! Both stages are pure functions of `(content, rules)` so they are
//! trivially testable in isolation and freely concurrent across checks.

mod structural;
mod term_list;

pub use structural::evaluate_structural;
pub use term_list::evaluate_term_list;
