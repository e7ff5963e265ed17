//! 服务层 - HTTP 传输装配

pub mod http;

pub use http::HttpService;
