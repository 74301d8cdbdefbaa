pub mod file_provider;
pub mod http_provider;
pub mod util;
