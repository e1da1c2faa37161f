//! Database reachability

use std::io;
use std::net::{TcpStream, ToSocketAddrs};

use super::report::Finding;
use crate::config::DatabaseTarget;

/// Error finding when no address of the target accepts a TCP connection in time
pub fn check_database(target: &DatabaseTarget) -> Option<Finding> {
    match connect(target) {
        Ok(()) => {
            tracing::debug!(host = %target.host, port = target.port, "database reachable");
            None
        }
        Err(e) => Some(Finding::error(format!(
            "database unreachable at {}:{}: {}",
            target.host, target.port, e
        ))),
    }
}

fn connect(target: &DatabaseTarget) -> io::Result<()> {
    let mut last_error = None;

    for addr in (target.host.as_str(), target.port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, target.timeout) {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::debug!(%addr, error = %e, "database address refused");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "host resolved to no addresses")
    }))
}
