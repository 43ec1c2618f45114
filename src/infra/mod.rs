pub mod http_client;
pub mod terminal_view;

pub use http_client::ReqwestHttp;
pub use terminal_view::TerminalView;
