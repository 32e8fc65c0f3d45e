//! Delivery of the composed message to the chatbox over OSC/UDP.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::error::{Result, VrcError};

/// Fire-and-forget sink for the composed status text
pub trait ChatboxTransport {
    fn send(&mut self, text: &str) -> Result<()>;
}

/// Build the `/chatbox/input` message: text, send immediately, no notification sound
pub fn chatbox_message(address: &str, text: &str) -> OscMessage {
    OscMessage {
        addr: address.to_string(),
        args: vec![
            OscType::String(text.to_string()),
            OscType::Bool(true),
            OscType::Bool(false),
        ],
    }
}

/// One datagram per message, no acknowledgement
pub struct OscTransport {
    socket: UdpSocket,
    target: SocketAddr,
    address: String,
}

impl OscTransport {
    /// Bind an ephemeral local socket aimed at `destination` (`host:port`)
    pub fn connect(destination: &str, address: &str) -> Result<Self> {
        let target = destination
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| VrcError::config(format!("could not resolve {}", destination)))?;

        let bind_addr = if target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };
        let socket = UdpSocket::bind(bind_addr)?;

        Ok(Self {
            socket,
            target,
            address: address.to_string(),
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl ChatboxTransport for OscTransport {
    fn send(&mut self, text: &str) -> Result<()> {
        let packet = OscPacket::Message(chatbox_message(&self.address, text));
        let bytes = encoder::encode(&packet)
            .map_err(|e| VrcError::transport(format!("failed to encode OSC packet: {:?}", e)))?;

        self.socket
            .send_to(&bytes, self.target)
            .map_err(|e| VrcError::transport(format!("send to {} failed: {}", self.target, e)))?;
        Ok(())
    }
}
