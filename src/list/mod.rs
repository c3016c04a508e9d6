/*!
 * List Core
 * Sorted circular doubly-linked list over an externally owned node arena
 */

mod arena;
mod hooks;
mod sorted;

pub use arena::Arena;
pub use hooks::{YieldPoint, YieldPoints};
pub use sorted::SortedList;
