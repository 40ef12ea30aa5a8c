pub mod manifest_server;
