//! Connection Tests
//!
//! Tests for connection setup and single exchanges over loopback TCP.

#[path = "../common/mod.rs"]
mod common;

use std::io::ErrorKind;
use std::net::TcpListener;
use std::time::Duration;

use common::{FakeServer, Reply};
use logicwire::config::{Config, Framing};
use logicwire::network::Connection;
use logicwire::protocol::Request;
use logicwire::LogicError;

// =============================================================================
// Connection Setup Tests
// =============================================================================

#[test]
fn test_open_refused() {
    // Grab a free port, then release it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config::builder().host("127.0.0.1").port(port).build();
    assert!(matches!(
        Connection::open(&config),
        Err(LogicError::Connection(_))
    ));
}

#[test]
fn test_open_rejects_invalid_config() {
    let config = Config::builder().port(0).build();
    assert!(matches!(Connection::open(&config), Err(LogicError::Config(_))));

    let config = Config::builder().host("").build();
    assert!(matches!(Connection::open(&config), Err(LogicError::Config(_))));

    let config = Config::builder()
        .framing(Framing::ShortRead { chunk_size: 0 })
        .build();
    assert!(matches!(Connection::open(&config), Err(LogicError::Config(_))));
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.addr(), "127.0.0.1:10429");
    assert_eq!(config.framing, Framing::ShortRead { chunk_size: 1024 });
    assert_eq!(config.read_timeout_ms, 0);
    assert!(config.channel_count.is_none());
    assert!(config.validate().is_ok());
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_exchange_round_trip() {
    let server = FakeServer::scripted(vec!["33\nACK\n".into()]);
    let mut connection = Connection::open(&server.config()).unwrap();

    let raw = connection
        .exchange(&Request::new("get_performance_option"))
        .unwrap();
    assert_eq!(&raw[..], b"33\nACK\n");

    drop(connection);
    assert_eq!(server.finish(), vec!["get_performance_option"]);
}

#[test]
fn test_exchange_sequential_requests() {
    let server = FakeServer::scripted(vec!["ACK".into(), "ACK".into(), "TRUE\nACK".into()]);
    let mut connection = Connection::open(&server.config()).unwrap();

    connection.exchange(&Request::new("capture")).unwrap();
    connection
        .exchange(&Request::new("save_to_file").arg("/tmp/run.logicdata"))
        .unwrap();
    let raw = connection
        .exchange(&Request::new("is_processing_complete"))
        .unwrap();
    assert_eq!(&raw[..], b"TRUE\nACK");

    drop(connection);
    assert_eq!(
        server.finish(),
        vec![
            "capture",
            "save_to_file,/tmp/run.logicdata",
            "is_processing_complete"
        ]
    );
}

#[test]
fn test_status_line_framing_over_fragmented_reply() {
    let server = FakeServer::scripted(vec![Reply::Fragments(
        vec!["1200, 500\n".into(), "2400, 500\n".into(), "ACK".into()],
        Duration::from_millis(30),
    )]);
    let config = Config::builder()
        .port(server.port)
        .framing(Framing::StatusLine)
        .build();
    let mut connection = Connection::open(&config).unwrap();

    let raw = connection
        .exchange(&Request::new("get_all_sample_rates"))
        .unwrap();
    assert_eq!(&raw[..], b"1200, 500\n2400, 500\nACK");

    drop(connection);
    server.finish();
}

#[test]
fn test_exact_chunk_multiple_hits_read_timeout() {
    // 4-byte reply with a 4-byte chunk: the client waits for one more read
    let server = FakeServer::scripted(vec![Reply::Stall(
        "ACK\n".into(),
        Duration::from_millis(1500),
    )]);
    let config = Config::builder()
        .port(server.port)
        .framing(Framing::ShortRead { chunk_size: 4 })
        .read_timeout_ms(200)
        .build();
    let mut connection = Connection::open(&config).unwrap();

    match connection.exchange(&Request::new("capture")) {
        Err(LogicError::Connection(e)) => assert!(matches!(
            e.kind(),
            ErrorKind::WouldBlock | ErrorKind::TimedOut
        )),
        other => panic!("Expected timeout, got {:?}", other),
    }

    drop(connection);
    server.finish();
}

#[test]
fn test_server_closes_without_reply() {
    let server = FakeServer::scripted(vec![Reply::Close]);
    let mut connection = Connection::open(&server.config()).unwrap();

    match connection.exchange(&Request::new("capture")) {
        Err(LogicError::Connection(e)) => assert!(matches!(
            e.kind(),
            ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset
        )),
        other => panic!("Expected Connection error, got {:?}", other),
    }

    server.finish();
}

#[test]
fn test_encoding_error_sends_nothing() {
    let server = FakeServer::scripted(vec![]);
    let mut connection = Connection::open(&server.config()).unwrap();

    assert!(matches!(
        connection.exchange(&Request::new("save_to_file").arg("x,y")),
        Err(LogicError::Encoding(_))
    ));

    drop(connection);
    assert!(server.finish().is_empty());
}
