pub mod client {
    pub mod models {
        pub mod common;
        pub mod stat;
        pub mod task;
    }
    pub mod client;
    pub mod codec;
    pub mod error;
    pub mod method;
    pub mod transport;
}

pub mod config;
pub mod format;
pub mod logger;
pub mod progress;
