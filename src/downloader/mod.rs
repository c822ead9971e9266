pub mod aggregate;
pub mod manager;
pub mod poller;
pub mod view;

pub use aggregate::tell_all;
pub use manager::{TaskManager, ToggleAction};
pub use poller::{Poller, Snapshot};
pub use view::{ETA_UNKNOWN, StatusFilter, TaskView};
