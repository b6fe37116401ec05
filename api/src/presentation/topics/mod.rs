// View models for the topic editor, badge display and filter popover.
// They hold no rendering code; a front end binds them to its widgets.

pub mod display;
pub mod editor;
pub mod filter;
pub mod filter_wrapper;
pub mod query_params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PreventDefault,
    Default,
}
