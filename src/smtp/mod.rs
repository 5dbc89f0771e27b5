//! SMTP mailbox probing.
//!
//! The public entry point is [`probe_mailbox`], which walks the MX exchanges
//! in order and runs a minimal `HELO`/`MAIL FROM`/`RCPT TO` dialogue against
//! each one. The first server answering `RCPT` with `250` wins; every other
//! outcome (connect failure, timeout, protocol garbage, rejection) moves on
//! to the next exchange. The signal is advisory: many servers accept any
//! recipient to avoid leaking mailbox enumeration.

mod error;
mod options;
mod session;
mod types;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use types::{MailboxSignal, SmtpReply};

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use tracing::debug;

use crate::mx::MxRecord;
use session::SmtpSession;

/// Probes the mail servers of `email`'s domain for mailbox existence.
///
/// One attempt per exchange, in the order given; transport and protocol
/// failures are swallowed and logged, never propagated.
pub fn probe_mailbox(email: &str, records: &[MxRecord], options: &ProbeOptions) -> MailboxSignal {
    for record in records {
        match probe_host(&record.exchange, email, options) {
            Ok(reply) if reply.code == 250 => {
                return MailboxSignal::Accepted {
                    exchange: record.exchange.clone(),
                    reply,
                };
            }
            Ok(reply) => {
                debug!(
                    exchange = %record.exchange,
                    code = reply.code,
                    "RCPT not accepted, trying next exchange"
                );
            }
            Err(err) => {
                debug!(exchange = %record.exchange, error = %err, "probe attempt failed");
            }
        }
    }
    MailboxSignal::Inconclusive
}

/// Runs the probe dialogue against a single exchange and returns the raw
/// `RCPT TO` reply.
fn probe_host(exchange: &str, email: &str, options: &ProbeOptions) -> Result<SmtpReply, ProbeError> {
    let addrs = resolve_socket_addrs(exchange, options.port)
        .map_err(|source| ProbeError::Resolve {
            host: exchange.to_string(),
            source,
        })?;
    if addrs.is_empty() {
        return Err(ProbeError::NoAddresses {
            host: exchange.to_string(),
        });
    }

    let mut session = SmtpSession::connect(&addrs, options.timeout()).map_err(|source| {
        ProbeError::Connect {
            host: exchange.to_string(),
            source,
        }
    })?;

    let banner = session.read_reply()?;
    if !banner.is_positive_completion() {
        session.quit();
        return Err(ProbeError::rejected("banner", banner.code));
    }

    let helo = session.send_command(&format!("HELO {}", options.helo_name))?;
    if !helo.is_positive_completion() {
        session.quit();
        return Err(ProbeError::rejected("HELO", helo.code));
    }

    let mail = session.send_command(&format!("MAIL FROM:<{}>", options.mail_from))?;
    if !mail.is_positive_completion() {
        session.quit();
        return Err(ProbeError::rejected("MAIL FROM", mail.code));
    }

    let rcpt = session.send_command(&format!("RCPT TO:<{email}>"))?;
    session.quit();
    Ok(rcpt)
}

fn resolve_socket_addrs(exchange: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    format!("{exchange}:{port}")
        .to_socket_addrs()
        .map(|iter| iter.collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::MxRecord;
    use std::io::{BufRead, BufReader, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    fn spawn_mock_server(
        script: Vec<(&'static str, &'static str)>,
    ) -> (u16, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let port = listener.local_addr().expect("addr").port();
        let (ready_tx, ready_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            ready_tx.send(()).ok();
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = handle_session(&mut stream, script);
            }
        });
        ready_rx.recv().expect("server ready");
        (port, handle)
    }

    fn handle_session(
        stream: &mut TcpStream,
        script: Vec<(&'static str, &'static str)>,
    ) -> std::io::Result<()> {
        let mut reader = BufReader::new(stream.try_clone()?);
        stream.write_all(b"220 mock.smtp.test ESMTP\r\n")?;
        stream.flush()?;
        for (expected, response) in script {
            let mut line = String::new();
            reader.read_line(&mut line)?;
            assert!(
                line.starts_with(expected),
                "expected command starting with '{expected}', got '{line}'"
            );
            stream.write_all(response.as_bytes())?;
            stream.flush()?;
        }
        Ok(())
    }

    fn options_for_port(port: u16) -> ProbeOptions {
        ProbeOptions {
            port,
            timeout_ms: 2_000,
            ..ProbeOptions::default()
        }
    }

    #[test]
    #[ignore = "requires loopback TCP binding"]
    fn accepting_server_yields_accepted() {
        let (port, handle) = spawn_mock_server(vec![
            ("HELO", "250 mock.example\r\n"),
            ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
            ("RCPT TO:", "250 2.1.5 Ok\r\n"),
            ("QUIT", "221 2.0.0 Bye\r\n"),
        ]);
        let records = vec![MxRecord::new(10, "127.0.0.1")];
        let signal = probe_mailbox("user@example.com", &records, &options_for_port(port));
        match signal {
            MailboxSignal::Accepted { exchange, reply } => {
                assert_eq!(exchange, "127.0.0.1");
                assert_eq!(reply.code, 250);
            }
            MailboxSignal::Inconclusive => panic!("expected acceptance"),
        }
        handle.join().expect("server thread");
    }

    #[test]
    #[ignore = "requires loopback TCP binding"]
    fn rejecting_server_yields_inconclusive() {
        let (port, handle) = spawn_mock_server(vec![
            ("HELO", "250 mock.example\r\n"),
            ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
            ("RCPT TO:", "550 5.1.1 User unknown\r\n"),
            ("QUIT", "221 2.0.0 Bye\r\n"),
        ]);
        let records = vec![MxRecord::new(10, "127.0.0.1")];
        let signal = probe_mailbox("nobody@example.com", &records, &options_for_port(port));
        assert!(matches!(signal, MailboxSignal::Inconclusive));
        handle.join().expect("server thread");
    }

    #[test]
    #[ignore = "requires loopback TCP binding"]
    fn unreachable_exchange_falls_through_to_next() {
        let (port, handle) = spawn_mock_server(vec![
            ("HELO", "250 mock.example\r\n"),
            ("MAIL FROM:", "250 2.1.0 Ok\r\n"),
            ("RCPT TO:", "250 2.1.5 Ok\r\n"),
            ("QUIT", "221 2.0.0 Bye\r\n"),
        ]);
        let records = vec![
            MxRecord::new(10, "does-not-resolve.invalid"),
            MxRecord::new(20, "127.0.0.1"),
        ];
        let signal = probe_mailbox("user@example.com", &records, &options_for_port(port));
        assert!(signal.is_accepted());
        handle.join().expect("server thread");
    }

    #[test]
    fn empty_record_list_is_inconclusive() {
        let signal = probe_mailbox("user@example.com", &[], &ProbeOptions::default());
        assert!(matches!(signal, MailboxSignal::Inconclusive));
    }
}
