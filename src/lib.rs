pub mod common;
pub mod downloader;

pub use common::client::client::Aria2Client;
pub use common::client::error::RpcError;
pub use common::client::method::Method;
pub use common::client::models::task::{Task, TaskFile, TaskStatus, TaskUri, UriStatus};
pub use common::config::Aria2Config;
pub use downloader::{Poller, StatusFilter, TaskManager};
