/// UI widgets built on iced
///
/// The state machine lives in `state`; these helpers only render it.

pub mod panels;
