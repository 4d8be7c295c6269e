// The two pure geometry engines. Both are free functions with no retained
// state: same input in, same output out, fresh allocation every call.

pub mod orbit;
pub mod shell_layout;
