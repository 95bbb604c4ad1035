pub mod font_server;
