use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use super::error::ProbeError;
use super::types::SmtpReply;

pub(crate) struct SmtpSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl SmtpSession {
    /// Connects to the first reachable address, with `timeout` applied to the
    /// connection attempt and to every subsequent read and write.
    pub(crate) fn connect(addrs: &[SocketAddr], timeout: Duration) -> io::Result<Self> {
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect_timeout(addr, timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(timeout))?;
                    stream.set_write_timeout(Some(timeout))?;
                    let reader = BufReader::new(stream.try_clone()?);
                    return Ok(Self { stream, reader });
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no socket address available",
            )
        }))
    }

    /// Writes `command` terminated by CRLF and reads the server's reply.
    pub(crate) fn send_command(&mut self, command: &str) -> Result<SmtpReply, ProbeError> {
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        self.stream
            .write_all(&line)
            .and_then(|()| self.stream.flush())
            .map_err(ProbeError::io)?;
        self.read_reply()
    }

    pub(crate) fn read_reply(&mut self) -> Result<SmtpReply, ProbeError> {
        let mut code = None;
        let mut message_lines = Vec::new();
        loop {
            let mut raw = String::new();
            let bytes = self.reader.read_line(&mut raw).map_err(ProbeError::io)?;
            if bytes == 0 {
                return Err(ProbeError::io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading reply",
                )));
            }
            if raw.ends_with('\n') {
                raw.pop();
                if raw.ends_with('\r') {
                    raw.pop();
                }
            }

            if raw.len() < 3 {
                return Err(ProbeError::Protocol(format!("invalid SMTP reply: '{raw}'")));
            }
            let code_part = &raw[..3];
            let parsed_code = code_part.parse::<u16>().map_err(|_| {
                ProbeError::Protocol(format!("invalid SMTP status code: '{code_part}'"))
            })?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(ProbeError::Protocol(format!(
                        "inconsistent SMTP reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let continuation = raw.as_bytes().get(3).copied() == Some(b'-');
            let text_start = if raw.len() > 3 { 4 } else { 3 };
            let text = if raw.len() > text_start {
                raw[text_start..].to_string()
            } else {
                String::new()
            };
            message_lines.push(text);
            if !continuation {
                break;
            }
        }
        Ok(SmtpReply {
            code: code
                .ok_or_else(|| ProbeError::Protocol("SMTP reply missing status code".to_string()))?,
            message: message_lines.join("\n"),
        })
    }

    /// Best-effort `QUIT`; the probe outcome is already decided by now.
    pub(crate) fn quit(&mut self) {
        let _ = self.send_command("QUIT");
    }
}
