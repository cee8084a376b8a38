pub mod graph_server;
