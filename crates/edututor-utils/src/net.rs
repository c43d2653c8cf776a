use listenfd::ListenFd;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

/// Binds the server socket.
///
/// When neither host nor port is configured a socket handed over by a process manager
/// (`listenfd`, e.g. `systemfd`) takes precedence over the default address.
pub async fn create_listener(
    (host, port): (Option<IpAddr>, Option<u16>),
    (default_host, default_port): (IpAddr, u16),
) -> io::Result<TcpListener> {
    if host.is_none() && port.is_none() {
        let mut listenfd = ListenFd::from_env();
        if let Some(listener) = listenfd.take_tcp_listener(0)? {
            listener.set_nonblocking(true)?;
            tracing::debug!("using socket passed by listenfd");
            return TcpListener::from_std(listener);
        }
    }

    let address = SocketAddr::from((host.unwrap_or(default_host), port.unwrap_or(default_port)));
    tracing::debug!(%address, "binding listener");
    TcpListener::bind(address).await
}
