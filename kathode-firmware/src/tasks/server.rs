//! Remote command server
//!
//! Accepts one TCP connection at a time on port 80, reads the first
//! request line with a bounded wait, hands it to the controller and writes
//! the JSON reply back. A client that connects but never sends anything is
//! dropped after the timeout so the clock tasks are never starved.

use defmt::{info, warn};
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};
use heapless::String;

use crate::channels::{ServerEvent, REPLY, REQUEST_LINE_LEN, SERVER_EVENTS};

const PORT: u16 = 80;
const REQUEST_WAIT: Duration = Duration::from_secs(3);

#[embassy_executor::task]
pub async fn server_task(stack: Stack<'static>) {
    info!("Command server started on port {}", PORT);

    let mut rx_buffer = [0u8; 512];
    let mut tx_buffer = [0u8; 512];

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(10)));

        if let Err(e) = socket.accept(PORT).await {
            warn!("accept failed: {:?}", e);
            continue;
        }

        match with_timeout(REQUEST_WAIT, read_request_line(&mut socket)).await {
            Err(_) => {
                SERVER_EVENTS.send(ServerEvent::Timeout).await;
                socket.abort();
            }
            Ok(None) => {
                socket.abort();
            }
            Ok(Some(line)) => {
                // Stale replies from a connection that died mid-exchange
                // must not answer this request.
                REPLY.reset();
                SERVER_EVENTS.send(ServerEvent::Request(line)).await;
                let reply = REPLY.wait().await;
                respond(&mut socket, &reply).await;
            }
        }
        // Drain FIN before the buffers are reused.
        let _ = socket.flush().await;
    }
}

/// Read up to the first newline. Returns None on a read error or a line
/// that overflows the buffer.
async fn read_request_line(
    socket: &mut TcpSocket<'_>,
) -> Option<String<REQUEST_LINE_LEN>> {
    let mut line: String<REQUEST_LINE_LEN> = String::new();
    let mut chunk = [0u8; 64];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return None,
            Ok(n) => n,
        };
        for &byte in &chunk[..n] {
            if byte == b'\n' {
                return Some(line);
            }
            if !byte.is_ascii() {
                return None;
            }
            if line.push(byte as char).is_err() {
                warn!("request line too long");
                return None;
            }
        }
    }
}

async fn respond(socket: &mut TcpSocket<'_>, body: &str) {
    let mut head: String<96> = String::new();
    let _ = core::fmt::write(
        &mut head,
        format_args!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        ),
    );
    if socket.write(head.as_bytes()).await.is_err() {
        return;
    }
    let _ = socket.write(body.as_bytes()).await;
    socket.close();
}
