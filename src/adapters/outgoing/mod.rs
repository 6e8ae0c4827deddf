pub mod memory_transport;
pub mod tcp_transport;

pub use memory_transport::MemoryTransport;
pub use tcp_transport::TcpTransport;
