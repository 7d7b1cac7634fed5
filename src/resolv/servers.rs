//! Server addresses handed out through result chains.
//!
//! The list of name servers of a [`Channel`][super::Channel] is exchanged
//! with callers as a [`DataChain`][super::DataChain] of either
//! [`AddrNode`]s or [`AddrPortNode`]s. A port of zero stands for the
//! default port.

use core::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

//------------ AddrNode ------------------------------------------------------

/// The address of a server.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AddrNode {
    addr: IpAddr,
}

impl AddrNode {
    pub fn new(addr: IpAddr) -> Self {
        AddrNode { addr }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }
}

impl Default for AddrNode {
    fn default() -> Self {
        AddrNode::new(Ipv4Addr::UNSPECIFIED.into())
    }
}

impl From<IpAddr> for AddrNode {
    fn from(addr: IpAddr) -> Self {
        AddrNode::new(addr)
    }
}

impl fmt::Display for AddrNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.addr.fmt(f)
    }
}

//------------ AddrPortNode --------------------------------------------------

/// The address of a server with separate ports for UDP and TCP.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AddrPortNode {
    addr: IpAddr,
    udp_port: u16,
    tcp_port: u16,
}

impl AddrPortNode {
    pub fn new(addr: IpAddr, udp_port: u16, tcp_port: u16) -> Self {
        AddrPortNode {
            addr,
            udp_port,
            tcp_port,
        }
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn udp_port(&self) -> u16 {
        self.udp_port
    }

    pub fn tcp_port(&self) -> u16 {
        self.tcp_port
    }

    /// Returns the socket address for UDP.
    pub fn udp_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.udp_port)
    }

    /// Returns the socket address for TCP.
    pub fn tcp_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.tcp_port)
    }
}

impl Default for AddrPortNode {
    fn default() -> Self {
        AddrPortNode::new(Ipv4Addr::UNSPECIFIED.into(), 0, 0)
    }
}

impl From<AddrNode> for AddrPortNode {
    fn from(node: AddrNode) -> Self {
        AddrPortNode::new(node.addr, 0, 0)
    }
}

impl From<SocketAddr> for AddrPortNode {
    fn from(addr: SocketAddr) -> Self {
        AddrPortNode::new(addr.ip(), addr.port(), addr.port())
    }
}

impl fmt::Display for AddrPortNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.udp_port == self.tcp_port {
            self.udp_addr().fmt(f)
        } else {
            write!(
                f,
                "{} udp {} tcp {}",
                self.addr, self.udp_port, self.tcp_port
            )
        }
    }
}

//============ Testing =======================================================
