pub mod build;
pub mod common;
pub mod health;
pub mod providers;
pub mod quotes;
pub mod status;

pub use build::post_build;
pub use health::health;
pub use providers::get_providers;
pub use quotes::post_quote;
pub use status::post_status;
